use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use stagehand_core::error::ValidationErrors;
use stagehand_domain::policy::{Action, Principal, ResourceKind};

use crate::domain::repository::{PaymentLookup, Repository};
use crate::domain::types::{Booking, Payment};
use crate::error::MarketplaceError;
use crate::usecase::crud::load_authorized;
use crate::usecase::{authorize, present};

/// A payment is a plain record of a processor outcome; nothing here talks to
/// a processor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentParams {
    pub booking_id: Option<Uuid>,
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    pub payment_status: Option<String>,
    /// External processor id.
    #[serde(alias = "stripe_payment_id")]
    pub processor_reference: Option<String>,
}

/// The booking must exist and carry no other payment.
async fn check_booking<R>(
    repo: &R,
    errors: &mut ValidationErrors,
    booking_id: Uuid,
    current: Option<Uuid>,
) -> Result<(), MarketplaceError>
where
    R: Repository<Booking> + PaymentLookup,
{
    if Repository::<Booking>::find_by_id(repo, booking_id).await?.is_none() {
        errors.add("booking", "must exist");
    } else if let Some(existing) = repo.find_payment_for_booking(booking_id).await? {
        errors.check(Some(existing.id) == current, "booking", "has already been taken");
    }
    Ok(())
}

fn check_amount(errors: &mut ValidationErrors, amount: Option<Decimal>) {
    errors.check(
        amount.is_none_or(|a| a >= Decimal::ZERO),
        "amount",
        "must be greater than or equal to 0",
    );
}

// ── CreatePayment ────────────────────────────────────────────────────────────

pub struct CreatePaymentUseCase<R> {
    pub repo: R,
}

impl<R> CreatePaymentUseCase<R>
where
    R: Repository<Payment> + Repository<Booking> + PaymentLookup,
{
    pub async fn execute(
        &self,
        principal: &Principal,
        params: PaymentParams,
    ) -> Result<Payment, MarketplaceError> {
        authorize(Some(principal), Action::Create, ResourceKind::Payment, None)?;

        let mut errors = ValidationErrors::new();
        match params.booking_id {
            Some(id) => check_booking(&self.repo, &mut errors, id, None).await?,
            None => errors.add("booking", "must exist"),
        }
        errors.check(params.amount.is_some(), "amount", "can't be blank");
        check_amount(&mut errors, params.amount);
        let (Some(booking_id), Some(amount)) = (params.booking_id, params.amount) else {
            return Err(errors.into());
        };
        errors.into_result()?;

        let now = Utc::now();
        let payment = Payment {
            id: Uuid::now_v7(),
            booking_id,
            amount,
            currency: present(params.currency),
            payment_status: present(params.payment_status),
            processor_reference: present(params.processor_reference),
            created_at: now,
            updated_at: now,
        };
        Repository::<Payment>::insert(&self.repo, &payment).await?;
        Ok(payment)
    }
}

// ── UpdatePayment ────────────────────────────────────────────────────────────

pub struct UpdatePaymentUseCase<R> {
    pub repo: R,
}

impl<R> UpdatePaymentUseCase<R>
where
    R: Repository<Payment> + Repository<Booking> + PaymentLookup,
{
    pub async fn execute(
        &self,
        principal: &Principal,
        id: Uuid,
        params: PaymentParams,
    ) -> Result<Payment, MarketplaceError> {
        let mut payment: Payment =
            load_authorized(&self.repo, Some(principal), Action::Update, id).await?;

        let mut errors = ValidationErrors::new();
        let new_booking = params.booking_id.filter(|bid| *bid != payment.booking_id);
        if let Some(booking_id) = new_booking {
            check_booking(&self.repo, &mut errors, booking_id, Some(payment.id)).await?;
        }
        check_amount(&mut errors, params.amount);
        errors.into_result()?;

        payment.booking_id = new_booking.unwrap_or(payment.booking_id);
        payment.amount = params.amount.unwrap_or(payment.amount);
        for (slot, value) in [
            (&mut payment.currency, params.currency),
            (&mut payment.payment_status, params.payment_status),
            (&mut payment.processor_reference, params.processor_reference),
        ] {
            if value.is_some() {
                *slot = present(value);
            }
        }
        payment.updated_at = Utc::now();
        Repository::<Payment>::update(&self.repo, &payment).await?;
        Ok(payment)
    }
}

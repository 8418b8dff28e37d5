//! Per-resource sortable columns.
//!
//! `sort_by` is parsed into one of these enums, so a caller-supplied column
//! name never reaches SQL as free text.

use stagehand_domain::pagination::{Sort, SortBy};

pub trait SortField: Copy + Send + Sync + 'static {
    /// Ordering applied when the caller gives no `sort_by`.
    const DEFAULT_ORDER: &'static [SortBy<Self>];

    /// Parse a snake_case column name.
    fn parse(name: &str) -> Option<Self>;

    fn column(self) -> &'static str;
}

macro_rules! sort_fields {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident => $column:literal),+ $(,)?
        }
        default [$(($dvariant:ident, $dorder:ident)),+ $(,)?]
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($variant),+
        }

        impl SortField for $name {
            const DEFAULT_ORDER: &'static [SortBy<Self>] = &[
                $(SortBy { field: Self::$dvariant, order: Sort::$dorder }),+
            ];

            fn parse(name: &str) -> Option<Self> {
                match name {
                    $($column => Some(Self::$variant),)+
                    _ => None,
                }
            }

            fn column(self) -> &'static str {
                match self {
                    $(Self::$variant => $column),+
                }
            }
        }
    };
}

sort_fields! {
    UserSort {
        CreatedAt => "created_at",
        UpdatedAt => "updated_at",
        Email => "email",
        Name => "name",
        Role => "role",
        Status => "status",
    }
    default [(CreatedAt, Desc)]
}

sort_fields! {
    ArtistProfileSort {
        CreatedAt => "created_at",
        Name => "name",
        City => "city",
        ExperienceYears => "experience_years",
        BasePrice => "base_price",
        IsApproved => "is_approved",
    }
    default [(CreatedAt, Desc)]
}

sort_fields! {
    ServiceSort {
        CreatedAt => "created_at",
        Name => "name",
        Price => "price",
        DurationMinutes => "duration_minutes",
    }
    default [(Name, Asc)]
}

sort_fields! {
    ServiceCategorySort {
        CreatedAt => "created_at",
        Name => "name",
        SortOrder => "sort_order",
    }
    default [(SortOrder, Asc), (Name, Asc)]
}

sort_fields! {
    AvailabilitySort {
        CreatedAt => "created_at",
        AvailableDate => "available_date",
        StartTime => "start_time",
    }
    default [(AvailableDate, Asc), (StartTime, Asc)]
}

sort_fields! {
    BookingSort {
        CreatedAt => "created_at",
        BookingDate => "booking_date",
        StartTime => "start_time",
        Status => "status",
        TotalAmount => "total_amount",
    }
    default [(BookingDate, Desc)]
}

sort_fields! {
    PaymentSort {
        CreatedAt => "created_at",
        Amount => "amount",
        PaymentStatus => "payment_status",
    }
    default [(CreatedAt, Desc)]
}

sort_fields! {
    ReviewSort {
        CreatedAt => "created_at",
        Rating => "rating",
    }
    default [(CreatedAt, Desc)]
}

sort_fields! {
    OrganizationSort {
        CreatedAt => "created_at",
        Name => "name",
        City => "city",
        Status => "status",
    }
    default [(Name, Asc)]
}

use rust_decimal::Decimal;

use stagehand_domain::policy::Listing;
use stagehand_domain::user::UserRole;
use stagehand_marketplace::domain::types::{Organization, Service};
use stagehand_marketplace::handlers::listing::ListParams;
use stagehand_marketplace::usecase::crud::ListUseCase;

use crate::helpers::{
    MemoryStore, principal_of, test_organization, test_profile, test_service, test_user,
};

fn organizations(count: usize) -> MemoryStore {
    let store = MemoryStore::new();
    // Seeded out of name order so the default order has work to do.
    for i in (0..count).rev() {
        store.put(test_organization(&format!("Org {i:02}")));
    }
    store
}

fn list_params(page: &str, per_page: &str) -> ListParams {
    ListParams {
        page: Some(page.into()),
        per_page: Some(per_page.into()),
        ..ListParams::default()
    }
}

fn names(items: &[Organization]) -> Vec<String> {
    items.iter().map(|o| o.name.clone()).collect()
}

#[tokio::test]
async fn should_window_second_page_with_links() {
    let uc = ListUseCase {
        repo: organizations(25),
    };
    let query = list_params("2", "10").query::<Organization>(10, Default::default()).unwrap();

    let page = uc.execute(None, Listing::Default, &query).await.unwrap();

    assert_eq!(page.items.len(), 10);
    assert_eq!(page.items[0].name, "Org 10");
    assert_eq!(page.items[9].name, "Org 19");
    assert_eq!(page.meta.current_page, 2);
    assert_eq!(page.meta.next_page, Some(3));
    assert_eq!(page.meta.prev_page, Some(1));
    assert_eq!(page.meta.total_pages, 3);
    assert_eq!(page.meta.total_count, 25);
}

#[tokio::test]
async fn should_reassemble_full_list_from_pages() {
    let store = organizations(23);
    let uc = ListUseCase {
        repo: store.clone(),
    };

    let mut seen = Vec::new();
    for page in 1..=3 {
        let query = list_params(&page.to_string(), "10")
            .query::<Organization>(10, Default::default())
            .unwrap();
        let paged = uc.execute(None, Listing::Default, &query).await.unwrap();
        seen.extend(names(&paged.items));
    }

    let mut expected = names(&store.all::<Organization>());
    expected.sort();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn should_return_empty_page_past_the_end() {
    let uc = ListUseCase {
        repo: organizations(5),
    };
    let query = list_params("4", "10").query::<Organization>(10, Default::default()).unwrap();

    let page = uc.execute(None, Listing::Default, &query).await.unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.meta.current_page, 4);
    assert_eq!(page.meta.next_page, None);
    assert_eq!(page.meta.prev_page, None);
    assert_eq!(page.meta.total_count, 5);
}

#[tokio::test]
async fn should_cap_oversized_pages() {
    let uc = ListUseCase {
        repo: organizations(120),
    };
    let query = list_params("1", "500").query::<Organization>(10, Default::default()).unwrap();

    let page = uc.execute(None, Listing::Default, &query).await.unwrap();

    assert_eq!(page.items.len(), 100);
    assert_eq!(page.meta.total_pages, 2);
}

#[tokio::test]
async fn should_sort_descending_on_request() {
    let uc = ListUseCase {
        repo: organizations(3),
    };
    let params = ListParams {
        sort_by: Some("name".into()),
        sort_order: Some("desc".into()),
        ..ListParams::default()
    };
    let query = params.query::<Organization>(10, Default::default()).unwrap();

    let page = uc.execute(None, Listing::Default, &query).await.unwrap();

    assert_eq!(names(&page.items), ["Org 02", "Org 01", "Org 00"]);
}

#[tokio::test]
async fn should_sort_prices_numerically_with_missing_last() {
    let store = MemoryStore::new();
    let user = store.put(test_user(UserRole::Customer));
    let profile = store.put(test_profile(store.put(test_user(UserRole::Artist)).id));
    for (name, price) in [("Mural", Some(900)), ("Sketch", Some(75)), ("Tattoo", None)] {
        store.put(Service {
            price: price.map(|p| Decimal::new(p, 0)),
            ..test_service(profile.id, name)
        });
    }
    let uc = ListUseCase { repo: store };
    let params = ListParams {
        sort_by: Some("price".into()),
        ..ListParams::default()
    };
    let query = params.query::<Service>(10, Default::default()).unwrap();

    let page = uc
        .execute(Some(&principal_of(&user, None)), Listing::Default, &query)
        .await
        .unwrap();

    let order: Vec<&str> = page.items.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(order, ["Sketch", "Mural", "Tattoo"]);
}

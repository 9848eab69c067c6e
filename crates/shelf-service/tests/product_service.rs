//! Service behaviour over an in-memory database.

use shelf_core::{ChildUpdate, NewProduct, ProductAttribute, ProductPatch};
use shelf_db::{Database, DbConfig};
use shelf_service::{ErrorCode, ListRequest, ProductService, RequestContext};

async fn service() -> ProductService {
    let db = Database::new(DbConfig::in_memory())
        .await
        .expect("in-memory database");
    ProductService::new(db.products())
}

fn product(sku: &str, barcodes: &[&str]) -> NewProduct {
    NewProduct {
        title: format!("Item {sku}"),
        sku: sku.to_string(),
        price: "4.50".to_string(),
        description: None,
        barcodes: barcodes.iter().map(|b| b.to_string()).collect(),
        attributes: vec![ProductAttribute::new("color", "red")],
    }
}

fn ctx() -> RequestContext {
    RequestContext::new()
}

#[tokio::test]
async fn create_then_get_with_projection() {
    let service = service().await;

    let id = service
        .create_product(&ctx(), product("MUG-1", &["111", "222"]))
        .await
        .unwrap();

    let found = service
        .get_product(&ctx(), id, vec!["sku".to_string(), "barcodes".to_string()])
        .await
        .unwrap();

    assert_eq!(found.id, id);
    assert_eq!(found.sku.as_deref(), Some("MUG-1"));
    assert_eq!(found.barcodes.map(|b| b.len()), Some(2));
    assert_eq!(found.title, None);
    assert_eq!(found.attributes, None);
}

#[tokio::test]
async fn duplicate_sku_is_a_conflict() {
    let service = service().await;
    service
        .create_product(&ctx(), product("MUG-1", &[]))
        .await
        .unwrap();

    let err = service
        .create_product(&ctx(), product("MUG-1", &[]))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::Conflict);
    assert_eq!(err.message, "SKU 'MUG-1' already exists");
}

#[tokio::test]
async fn barcodes_are_unique_across_products() {
    let service = service().await;
    service
        .create_product(&ctx(), product("MUG-1", &["111", "222"]))
        .await
        .unwrap();

    let err = service
        .create_product(&ctx(), product("MUG-2", &["333", "222"]))
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::Conflict);
    assert_eq!(err.message, "Barcodes not unique: 222");

    let page = service
        .list_products(&ctx(), ListRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn update_may_keep_its_own_sku_and_barcodes() {
    let service = service().await;
    let id = service
        .create_product(&ctx(), product("MUG-1", &["111", "222"]))
        .await
        .unwrap();

    let patch = ProductPatch {
        sku: Some("MUG-1".to_string()),
        barcodes: ChildUpdate::Replace(vec!["222".to_string(), "333".to_string()]),
        ..ProductPatch::default()
    };
    service.update_product(&ctx(), id, patch).await.unwrap();

    let found = service
        .get_product(&ctx(), id, vec!["barcodes".to_string()])
        .await
        .unwrap();
    let mut barcodes = found.barcodes.unwrap();
    barcodes.sort();
    assert_eq!(barcodes, vec!["222".to_string(), "333".to_string()]);
}

#[tokio::test]
async fn update_rejects_values_owned_by_another_product() {
    let service = service().await;
    service
        .create_product(&ctx(), product("MUG-1", &["111"]))
        .await
        .unwrap();
    let id = service
        .create_product(&ctx(), product("MUG-2", &["222"]))
        .await
        .unwrap();

    let err = service
        .update_product(
            &ctx(),
            id,
            ProductPatch {
                sku: Some("MUG-1".to_string()),
                ..ProductPatch::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::Conflict);

    let err = service
        .update_product(
            &ctx(),
            id,
            ProductPatch {
                barcodes: ChildUpdate::Replace(vec!["111".to_string()]),
                ..ProductPatch::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::Conflict);
    assert_eq!(err.message, "Barcodes not unique: 111");
}

#[tokio::test]
async fn missing_products_are_not_found() {
    let service = service().await;

    let err = service.get_product(&ctx(), 42, vec![]).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
    assert_eq!(err.message, "Can't find product 42");

    let err = service
        .update_product(&ctx(), 42, ProductPatch::default())
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);

    let err = service.delete_product(&ctx(), 42).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn not_found_wins_over_invalid_input() {
    let service = service().await;

    let patch = ProductPatch {
        title: Some(String::new()),
        ..ProductPatch::default()
    };
    let err = service.update_product(&ctx(), 7, patch).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn delete_then_get_is_not_found() {
    let service = service().await;
    let id = service
        .create_product(&ctx(), product("MUG-1", &["111"]))
        .await
        .unwrap();

    service.delete_product(&ctx(), id).await.unwrap();

    let err = service.get_product(&ctx(), id, vec![]).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn zero_limit_uses_the_default_page_size() {
    let service = service().await;
    for n in 0..12 {
        service
            .create_product(&ctx(), product(&format!("SKU-{n}"), &[]))
            .await
            .unwrap();
    }

    let page = service
        .list_products(&ctx(), ListRequest::default())
        .await
        .unwrap();
    assert_eq!(page.products.len(), 10);
    assert_eq!(page.total, 12);

    let small = service.clone().with_default_page_size(3);
    let page = small
        .list_products(&ctx(), ListRequest::default())
        .await
        .unwrap();
    assert_eq!(page.products.len(), 3);
}

#[tokio::test]
async fn empty_filters_match_everything() {
    let service = service().await;
    service
        .create_product(&ctx(), product("A", &["111"]))
        .await
        .unwrap();
    service
        .create_product(&ctx(), product("B", &["222"]))
        .await
        .unwrap();

    let request = ListRequest {
        sku: Some(String::new()),
        barcode: Some(String::new()),
        ..ListRequest::default()
    };
    let page = service.list_products(&ctx(), request).await.unwrap();
    assert_eq!(page.total, 2);

    let request = ListRequest {
        barcode: Some("222".to_string()),
        fields: vec!["sku".to_string()],
        ..ListRequest::default()
    };
    let page = service.list_products(&ctx(), request).await.unwrap();
    assert_eq!(page.total, 1);
    assert_eq!(page.products[0].sku.as_deref(), Some("B"));
    assert_eq!(page.products[0].barcodes, None);
}

#[tokio::test]
async fn unknown_field_is_rejected() {
    let service = service().await;

    let request = ListRequest {
        fields: vec!["sku".to_string(), "colour".to_string()],
        ..ListRequest::default()
    };
    let err = service.list_products(&ctx(), request).await.unwrap_err();

    assert_eq!(err.code, ErrorCode::ValidationError);
    assert!(err.message.contains("colour"));
}

#[tokio::test]
async fn invalid_input_is_rejected_before_writing() {
    let service = service().await;

    let cases = [
        NewProduct {
            title: String::new(),
            ..product("A", &[])
        },
        NewProduct {
            price: "cheap".to_string(),
            ..product("A", &[])
        },
        NewProduct {
            price: "10000001".to_string(),
            ..product("A", &[])
        },
        product("A", &["111", "111"]),
        NewProduct {
            attributes: vec![
                ProductAttribute::new("Color", "Red"),
                ProductAttribute::new("color", "red"),
            ],
            ..product("A", &[])
        },
    ];

    for input in cases {
        let err = service.create_product(&ctx(), input).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    let page = service
        .list_products(&ctx(), ListRequest::default())
        .await
        .unwrap();
    assert_eq!(page.total, 0);
}

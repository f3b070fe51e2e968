use b2b_cart::aggregate::CartMutation;
use b2b_cart::alert_actor::AlertError;
use b2b_cart::lifecycle::CartSystem;
use b2b_cart::model::{
    AlertKey, AuthEvent, CartLineItem, LocalizedText, StockAlertCreate, StockSnapshot, UserId,
};
use b2b_cart::stock::InMemoryCatalog;
use b2b_cart::sync::{AddOutcome, CartSyncEngine, LocalCartCache, LocalCartKey, MemoryCartCache};
use rust_decimal::Decimal;
use std::sync::Arc;

fn line(product: &str, qty: u32, price_cents: i64) -> CartLineItem {
    CartLineItem::new(
        product,
        format!("SKU-{product}"),
        product,
        Decimal::new(price_cents, 2),
        qty,
    )
}

fn catalog() -> Arc<InMemoryCatalog> {
    let in_stock = StockSnapshot {
        own_stock: 100,
        ..Default::default()
    };
    Arc::new(InMemoryCatalog::with_stock([
        ("SKU-p1", in_stock.clone()),
        ("SKU-p2", in_stock.clone()),
        ("SKU-p3", in_stock),
    ]))
}

/// Full end-to-end test with the real actors: an anonymous session signs in to an
/// account that already has a stored cart, then keeps shopping.
#[tokio::test]
async fn test_anonymous_cart_merges_into_stored_cart() {
    let catalog = catalog();
    let system = CartSystem::new(16, catalog.clone());
    let user = UserId::from("buyer-1");

    // Stored cart from an earlier visit on another device
    system
        .cart_client
        .mutate(user.clone(), CartMutation::Add(line("p1", 1, 1000)))
        .await
        .expect("Failed to seed stored cart");
    system
        .cart_client
        .mutate(user.clone(), CartMutation::Add(line("p2", 2, 250)))
        .await
        .expect("Failed to seed stored cart");

    // Anonymous session
    let key = LocalCartKey::generate();
    let cache = Arc::new(MemoryCartCache::new());
    let mut engine = CartSyncEngine::new(
        key,
        system.cart_client.clone(),
        catalog.clone(),
        cache.clone(),
    );
    assert!(matches!(
        engine.add(line("p1", 3, 1000)).await.unwrap(),
        AddOutcome::Added(_)
    ));
    engine.add(line("p3", 1, 500)).await.unwrap();
    assert_eq!(cache.load(&key).await.unwrap().len(), 2);

    // Sign in: p1 takes max(3, 1), p2 stays, p3 is appended
    engine
        .handle_auth(AuthEvent::SignedIn(user.clone()))
        .await
        .expect("Merge failed");

    let stored = system.cart_client.get_cart(user.clone()).await.unwrap();
    let got: Vec<_> = stored
        .items
        .iter()
        .map(|l| (l.product_id.0.as_str(), l.quantity))
        .collect();
    assert_eq!(got, [("p1", 3), ("p2", 2), ("p3", 1)]);
    assert_eq!(stored.total, Decimal::new(4000, 2));
    assert_eq!(engine.summary(), stored);
    assert!(stored.items.iter().all(|l| l.id.is_some()));
    assert!(cache.load(&key).await.unwrap().is_empty());

    // Signed in: changes reach the store
    engine.update_quantity("p2".into(), 0).await.unwrap();
    engine.add(line("p3", 4, 500)).await.unwrap();
    engine.settle().await;

    let stored = system.cart_client.get_cart(user.clone()).await.unwrap();
    assert_eq!(stored.count, 2);
    assert_eq!(stored, engine.summary());

    // Removing by server record id works the same as by product id
    let record_id = stored.items[0].id.clone().unwrap();
    engine.remove(&record_id).await.unwrap();
    engine.settle().await;
    let stored = system.cart_client.get_cart(user.clone()).await.unwrap();
    assert_eq!(stored.count, 1);

    drop(engine);
    system.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_alert_registration_rejects_duplicates() {
    let system = CartSystem::new(16, catalog());

    let request = |email: &str| StockAlertCreate {
        product_id: "p9".into(),
        sku: "SKU-p9".into(),
        name: LocalizedText::new("Hex bolt M8"),
        email: email.into(),
    };

    let alert = system
        .alert_client
        .register(request("Buyer@Example.com"))
        .await
        .expect("Failed to register alert");
    assert_eq!(alert.email, "buyer@example.com");

    let duplicate = system
        .alert_client
        .register(request("buyer@example.com"))
        .await;
    assert!(matches!(duplicate, Err(AlertError::AlreadyRegistered(_))));

    let found = system
        .alert_client
        .find(AlertKey::new("p9".into(), "BUYER@example.com"))
        .await
        .unwrap();
    assert_eq!(found, Some(alert));

    // Another product for the same email is a different alert
    let mut other = request("buyer@example.com");
    other.product_id = "p10".into();
    assert!(system.alert_client.register(other).await.is_ok());

    system.shutdown().await.expect("Shutdown failed");
}

use actor_framework::ActorClient;
use b2b_cart::aggregate::CartMutation;
use b2b_cart::cart_actor::{self, CartError};
use b2b_cart::model::{CartLineItem, UserId};
use rust_decimal::Decimal;

fn line(product: &str, qty: u32) -> CartLineItem {
    CartLineItem::new(product, "SKU", product, Decimal::new(199, 2), qty)
}

/// The real Cart actor serialises requests: concurrent adds from many tasks all land.
#[tokio::test]
async fn test_concurrent_adds_are_applied_one_at_a_time() {
    let (actor, client) = cart_actor::new(8);
    let handle = tokio::spawn(actor.run(()));
    let owner = UserId::from("u1");

    let mut tasks = Vec::new();
    for _ in 0..20 {
        let client = client.clone();
        let owner = owner.clone();
        tasks.push(tokio::spawn(async move {
            client
                .mutate(owner, CartMutation::Add(line("p1", 1)))
                .await
        }));
    }
    for task in tasks {
        task.await.unwrap().expect("Add failed");
    }

    let cart = client.get_cart(owner).await.unwrap();
    assert_eq!(cart.count, 1);
    assert_eq!(cart.items[0].quantity, 20);
    assert_eq!(cart.total, Decimal::new(3980, 2));

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_reads_do_not_create_carts() {
    let (actor, client) = cart_actor::new(8);
    tokio::spawn(actor.run(()));

    let summary = client.get_cart("nobody".into()).await.unwrap();
    assert_eq!(summary.count, 0);
    assert!(client.get("nobody".into()).await.unwrap().is_none());

    // the first mutation creates the cart, even one that empties it
    client
        .mutate("u2".into(), CartMutation::Clear)
        .await
        .unwrap();
    let cart = client.get("u2".into()).await.unwrap().expect("Cart not created");
    assert!(cart.is_empty());
}

#[tokio::test]
async fn test_rejected_mutation_leaves_stored_cart_unchanged() {
    let (actor, client) = cart_actor::new(8);
    tokio::spawn(actor.run(()));
    let owner = UserId::from("u1");

    client
        .mutate(owner.clone(), CartMutation::Add(line("p1", 2)))
        .await
        .unwrap();

    let err = client
        .mutate(owner.clone(), CartMutation::quantity_update("p9".into(), 3).unwrap())
        .await
        .unwrap_err();
    assert_eq!(err, CartError::LineNotFound("p9".into()));

    let err = client
        .replace(owner.clone(), vec![line("p1", 0)])
        .await
        .unwrap_err();
    assert!(matches!(err, CartError::InvalidLine(_)));

    let cart = client.get_cart(owner).await.unwrap();
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.items[0].quantity, 2);
}

#[tokio::test]
async fn test_carts_are_isolated_per_user() {
    let (actor, client) = cart_actor::new(8);
    tokio::spawn(actor.run(()));

    client
        .mutate("alice".into(), CartMutation::Add(line("p1", 1)))
        .await
        .unwrap();
    client
        .merge("bob".into(), vec![line("p2", 4)])
        .await
        .unwrap();

    let alice = client.get_cart("alice".into()).await.unwrap();
    let bob = client.get_cart("bob".into()).await.unwrap();
    assert_eq!(alice.items[0].product_id.0, "p1");
    assert_eq!(bob.items[0].product_id.0, "p2");
    assert_eq!(bob.count, 1);
}

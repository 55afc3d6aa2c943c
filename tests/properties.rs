use cart_recipe::cart_actor::{self, CartChange, CartContext, CartError};
use cart_recipe::model::{Cart, Product, ProductId, Stock};
use cart_recipe::services::mock::RecordingNotifier;
use cart_recipe::services::{InventoryApi, MemoryStore};
use proptest::prelude::*;
use std::sync::Arc;
use store_framework::StoreHandle;

/// Runs `adds` add commands for one product with `stock` units available.
/// Returns the number applied and the final cart.
fn run_adds(stock: u32, adds: usize, others: &[u32]) -> (usize, Cart) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    runtime.block_on(async {
        let id = ProductId(1);
        let mut products = vec![Product::new(1, "Tênis", 99.9, "t.jpg")];
        let mut levels = vec![Stock { id, amount: stock }];
        for other in others {
            products.push(Product::new(*other, "Outro", 10.0, "o.jpg"));
            levels.push(Stock {
                id: ProductId(*other),
                amount: 100,
            });
        }
        let inventory = Arc::new(InventoryApi::new(products, levels));

        let context = CartContext {
            stock: inventory.clone(),
            catalog: inventory,
            storage: Arc::new(MemoryStore::new()),
            notifier: Arc::new(RecordingNotifier::new()),
            storage_key: "cart".to_string(),
        };
        let (actor, client) = cart_actor::new(Cart::new(), 4);
        tokio::spawn(actor.run(context));

        for other in others {
            client.add_product(ProductId(*other)).await.unwrap();
        }

        let mut applied = 0;
        for _ in 0..adds {
            match client.add_product(id).await {
                Ok(CartChange::Applied) => applied += 1,
                Err(CartError::StockExceeded { .. }) => {}
                other => panic!("Unexpected result: {other:?}"),
            }
        }
        (applied, client.get().await.unwrap())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_repeated_adds_count_up_to_stock(stock in 0u32..12, adds in 0usize..16) {
        let (applied, cart) = run_adds(stock, adds, &[]);
        let expected = adds.min(stock as usize);

        prop_assert_eq!(applied, expected);
        prop_assert_eq!(cart.amount_of(ProductId(1)) as usize, expected);
        let lines = cart.iter().filter(|item| item.id() == ProductId(1)).count();
        prop_assert_eq!(lines, usize::from(expected > 0));
    }

    #[test]
    fn prop_other_lines_keep_their_order(
        others in proptest::collection::btree_set(2u32..50, 0..6),
        adds in 1usize..4,
    ) {
        let others: Vec<u32> = others.into_iter().collect();
        let (_, cart) = run_adds(10, adds, &others);

        let mut expected: Vec<u32> = others.clone();
        expected.push(1);
        let ids: Vec<u32> = cart.iter().map(|item| item.id().0).collect();
        prop_assert_eq!(ids, expected);
    }
}

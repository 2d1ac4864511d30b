//! Integration tests for cart invariants under long operation sequences.
//!
//! Sequences are generated from a small deterministic LCG so every run exercises
//! the same mix of adds, removes, quantity updates, increments and decrements.

use rust_decimal::Decimal;
use testresult::TestResult;

use trolley::prelude::*;

struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next() % n
    }
}

fn snapshot(id: i64, revision: u64) -> ProductSnapshot {
    let price = 1_000 * id.unsigned_abs() + revision;

    ProductSnapshot::new(id, format!("Product {id} rev {revision}"), price.to_string())
}

fn assert_invariants(cart: &CartStore<MemoryStorage>) {
    let items = cart.items();

    for (idx, item) in items.iter().enumerate() {
        assert!(item.quantity >= 1, "line {idx} has quantity 0");
        assert!(
            items
                .iter()
                .skip(idx + 1)
                .all(|other| other.product_id != item.product_id),
            "product {} appears twice",
            item.product_id
        );
    }

    let amount: Decimal = items
        .iter()
        .map(|item| item.unit_price * Decimal::from(item.quantity))
        .sum();
    let quantity: u64 = items.iter().map(|item| u64::from(item.quantity)).sum();

    assert_eq!(cart.total_amount(), amount);
    assert_eq!(cart.total_quantity(), quantity);
}

#[test]
fn random_sequences_preserve_invariants() -> TestResult {
    for seed in 1..=20 {
        let mut rng = Lcg(seed);
        let storage = MemoryStorage::new();
        let mut cart = CartStore::new(storage.clone(), CartConfig::default());

        for step in 0..200 {
            let id = i64::try_from(rng.below(6))?;
            let product_id = ProductId::Int(id);

            match rng.below(6) {
                0 | 1 => {
                    let quantity = u32::try_from(rng.below(4) + 1)?;
                    cart.add_to_cart(&snapshot(id, step), quantity)?;
                }
                2 => {
                    cart.remove_from_cart(&product_id);
                }
                3 => cart.update_quantity(&product_id, u32::try_from(rng.below(4))?)?,
                4 => {
                    let expected = cart.is_in_cart(&product_id);
                    assert_eq!(cart.increment_quantity(&product_id).is_ok(), expected);
                }
                _ => {
                    let before = cart.item_quantity(&product_id);
                    match cart.decrement_quantity(&product_id) {
                        Ok(after) => assert_eq!(after, before - 1),
                        Err(err) => assert_eq!(err, CartError::NotFound(product_id.clone())),
                    }
                }
            }

            assert_invariants(&cart);
        }

        let reopened = CartStore::new(storage, CartConfig::default());
        assert_eq!(reopened.items(), cart.items(), "seed {seed} did not round-trip");
    }

    Ok(())
}

#[test]
fn re_adding_sums_quantities_and_takes_latest_snapshot() -> TestResult {
    let mut cart = CartStore::new(MemoryStorage::new(), CartConfig::default());
    let id = ProductId::Int(1);

    cart.add_to_cart(&ProductSnapshot::new(1, "Rose", "100000"), 2)?;
    cart.add_to_cart(&ProductSnapshot::new(1, "Rose (seasonal)", "90000"), 3)?;

    let item = cart.item(&id).ok_or("rose missing")?;

    assert_eq!(item.quantity, 5);
    assert_eq!(item.unit_price, Decimal::from(90_000));
    assert_eq!(item.name, "Rose (seasonal)");
    assert_eq!(cart.total_amount(), Decimal::from(450_000));

    Ok(())
}

#[test]
fn rose_scenario_empties_the_cart() -> TestResult {
    let mut cart = CartStore::new(MemoryStorage::new(), CartConfig::default());
    let id = ProductId::Int(1);

    cart.add_to_cart(&ProductSnapshot::new(1, "Rose", "100000"), 2)?;

    assert_eq!(cart.total_quantity(), 2);
    assert_eq!(cart.total_amount(), Decimal::from(200_000));

    cart.decrement_quantity(&id)?;
    assert_eq!(cart.total_quantity(), 1);

    cart.decrement_quantity(&id)?;
    assert!(cart.is_empty());
    assert!(!cart.is_in_cart(&id));
    assert_eq!(cart.item_quantity(&id), 0);

    Ok(())
}

#[test]
fn string_and_numeric_ids_are_distinct_lines() -> TestResult {
    let mut cart = CartStore::new(MemoryStorage::new(), CartConfig::default());

    cart.add_one(&ProductSnapshot::new(1, "Rose", 10_u64))?;
    cart.add_one(&ProductSnapshot::new("1", "Rose", 10_u64))?;

    assert_eq!(cart.len(), 2);
    assert_eq!(cart.item_quantity(&ProductId::Int(1)), 1);
    assert_eq!(cart.item_quantity(&ProductId::from("1")), 1);

    Ok(())
}

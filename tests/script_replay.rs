//! Integration tests replaying the YAML cart scripts in `fixtures/scripts`.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::IDR};
use testresult::TestResult;

use trolley::{fixtures::Script, prelude::*};

fn replay(name: &str, config: CartConfig) -> TestResult<CartStore<MemoryStorage>> {
    let script = Script::from_set(name)?;
    let catalog = script.load_catalog()?;
    let mut cart = CartStore::new(MemoryStorage::new(), config);

    for command in script.commands(&catalog)? {
        cart.apply(command)?;
    }

    Ok(cart)
}

#[test]
fn checkout_script_totals() -> TestResult {
    let cart = replay(
        "checkout",
        CartConfig::default().with_storage_base_url("https://shop.example.com/storage"),
    )?;

    let names: Vec<&str> = cart.items().iter().map(|item| item.name.as_str()).collect();

    assert_eq!(names, vec!["Rose", "Lily", "Wedding Bouquet", "Greeting Card"]);
    assert_eq!(cart.total_quantity(), 10);
    assert_eq!(cart.total_amount(), Decimal::from(1_030_000));
    assert_eq!(
        cart.total_money(),
        Money::from_decimal(Decimal::from(1_030_000), IDR)
    );

    Ok(())
}

#[test]
fn checkout_script_resolves_images() -> TestResult {
    let cart = replay(
        "checkout",
        CartConfig::default().with_storage_base_url("https://shop.example.com/storage"),
    )?;

    let image = |id: ProductId| cart.item(&id).and_then(|item| item.image_url.clone());

    // Primary second entry beats the first entry.
    assert_eq!(
        image(ProductId::Int(1)).as_deref(),
        Some("https://shop.example.com/storage/products/rose.jpg")
    );
    assert_eq!(
        image(ProductId::Int(2)).as_deref(),
        Some("https://cdn.example.com/lily.jpg")
    );
    // Images list wins over the top-level URL.
    assert_eq!(
        image(ProductId::from("bouquet-wedding")).as_deref(),
        Some("https://shop.example.com/storage/products/wedding-top.jpg")
    );
    assert_eq!(image(ProductId::from("greeting-card")), None);

    Ok(())
}

#[test]
fn empty_out_script_leaves_nothing() -> TestResult {
    let cart = replay("empty-out", CartConfig::default())?;

    assert!(cart.is_empty());
    assert_eq!(cart.total_amount(), Decimal::ZERO);

    Ok(())
}

#[test]
fn top_level_path_and_default_category_apply() -> TestResult {
    let catalog = trolley::fixtures::Catalog::from_set("florist")?;
    let mut cart = CartStore::new(MemoryStorage::new(), CartConfig::default());

    let item = cart.add_one(catalog.product("tulip")?)?;

    assert_eq!(item.image_url.as_deref(), Some("/storage/products/tulip.jpg"));
    assert_eq!(item.category, "Uncategorized");
    assert_eq!(item.unit_price, Decimal::new(4_500_050, 2));

    Ok(())
}

#[test]
fn catalog_rejects_reach_the_caller() -> TestResult {
    let catalog = trolley::fixtures::Catalog::from_set("florist")?;
    let mut cart = CartStore::new(MemoryStorage::new(), CartConfig::default());

    assert_eq!(
        cart.add_one(catalog.product("mystery")?).map(|_| ()),
        Err(CartError::InvalidInput(InvalidInput::MissingProductId))
    );
    assert_eq!(
        cart.add_one(catalog.product("broken")?).map(|_| ()),
        Err(CartError::InvalidInput(InvalidInput::InvalidPrice(
            "call us".to_string()
        )))
    );
    assert!(cart.is_empty());

    Ok(())
}

use anyhow::Result;
use tempfile::TempDir;
use tienda_kit::core::formatters::format_currency;
use tienda_kit::domain::model::{AdminUser, CartItem, PaymentOutcome};
use tienda_kit::domain::ports::KeyValueStore;
use tienda_kit::store;
use tienda_kit::{AdminSession, Cart, CustomerSession, FileStore};

fn polera(quantity: u32) -> CartItem {
    CartItem {
        id: 101,
        name: "Polera básica".to_string(),
        price: 7990,
        quantity,
        image: Some("/img/polera.png".to_string()),
        stock: 4,
    }
}

fn jeans(quantity: u32) -> CartItem {
    CartItem {
        id: 202,
        name: "Jeans".to_string(),
        price: 24990,
        quantity,
        image: None,
        stock: 2,
    }
}

#[test]
fn test_cart_persists_between_sessions_on_disk() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("localStorage.json");

    {
        let mut cart = Cart::load(FileStore::new(&path))?;
        assert!(cart.is_empty());
        cart.add(polera(2))?;
        cart.add(jeans(1))?;
        cart.update_quantity(202, 2)?;
    }

    let cart = Cart::load(FileStore::new(&path))?;
    assert_eq!(cart.items().len(), 2);
    assert_eq!(cart.item_count(), 4);
    assert_eq!(cart.total(), 2 * 7990 + 2 * 24990);
    assert_eq!(format_currency(cart.total()), "$65.960");

    Ok(())
}

#[test]
fn test_successful_payment_callback_clears_saved_cart() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let file_store = FileStore::new(temp_dir.path().join("localStorage.json"));

    let mut cart = Cart::load(&file_store)?;
    cart.add(polera(1))?;

    let outcome = PaymentOutcome::from_query("estado=anulado&orden=ABC123");
    assert!(!cart.apply_payment_outcome(&outcome)?);
    assert!(store::CART.get(&file_store)?.is_some());

    let outcome = PaymentOutcome::from_query("?estado=exito&orden=ABC123&monto=7990");
    assert!(cart.apply_payment_outcome(&outcome)?);
    assert_eq!(store::CART.get(&file_store)?, None);

    let reloaded = Cart::load(&file_store)?;
    assert!(reloaded.is_empty());

    Ok(())
}

#[test]
fn test_admin_session_shares_store_with_cart() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let file_store = FileStore::new(temp_dir.path().join("localStorage.json"));

    let session = AdminSession::new(&file_store);
    let admin = AdminUser {
        id_usuario: 7,
        username: "bodega".to_string(),
        nombres: "Ignacio".to_string(),
        id_rol: 1,
    };
    session.login(&admin)?;

    let mut cart = Cart::load(&file_store)?;
    cart.add(jeans(2))?;
    assert!(cart.add(jeans(1)).is_ok_and(|changed| !changed));

    session.logout()?;
    assert!(!AdminSession::new(&file_store).is_authenticated()?);
    assert_eq!(Cart::load(&file_store)?.item_count(), 2);

    Ok(())
}

#[test]
fn test_customer_logout_empties_cart_on_disk() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("localStorage.json");

    {
        let file_store = FileStore::new(&path);
        let customer = CustomerSession::new(&file_store);
        customer.login("tok-abc", &serde_json::json!({ "id": 5, "email": "ana@tienda.cl" }))?;
        Cart::load(&file_store)?.add(polera(2))?;
    }

    let file_store = FileStore::new(&path);
    let customer = CustomerSession::new(&file_store);
    let login = customer.restore()?.expect("saved login");
    assert_eq!(login.token, "tok-abc");
    assert_eq!(file_store.get_raw("authToken")?.as_deref(), Some("tok-abc"));

    customer.logout()?;
    assert_eq!(customer.restore()?, None);
    assert!(Cart::load(FileStore::new(&path))?.is_empty());

    Ok(())
}

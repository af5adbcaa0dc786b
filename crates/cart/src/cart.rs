use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use storefront_core::{AggregateId, AggregateRoot, DomainError, DomainResult, Entity};
use storefront_products::{Product, ProductId};

/// Cart identifier (one cart per shopping session).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartId(pub AggregateId);

impl CartId {
    pub fn new(id: AggregateId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for CartId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Cart line: one product's presence in the cart.
///
/// The line id IS the product id. Lookups, removal and merge detection all
/// key on it, so a cart never holds two lines for the same product. The line
/// carries an immutable snapshot of the product taken at add time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    line_id: ProductId,
    product: Product,
    quantity: i64,
}

impl CartLine {
    fn new(product: Product, quantity: i64) -> Self {
        Self {
            line_id: product.id_typed(),
            product,
            quantity,
        }
    }

    pub fn line_id(&self) -> ProductId {
        self.line_id
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Always >= 1 for a line that exists.
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Unit price × quantity for this line.
    pub fn line_total(&self) -> Decimal {
        self.product.price().amount() * Decimal::from(self.quantity)
    }
}

impl Entity for CartLine {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.line_id
    }
}

/// Aggregate root: Cart.
///
/// Owns an ordered list of lines. Insertion order is preserved for display
/// and carries no meaning for totals. A cart has a single logical owner at a
/// time; an embedding server must serialize access per instance (one cart
/// per session key, or a per-instance mutex) rather than lock globally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    id: CartId,
    lines: Vec<CartLine>,
    version: u64,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(id: CartId) -> Self {
        Self {
            id,
            lines: Vec::new(),
            version: 0,
        }
    }

    pub fn id_typed(&self) -> CartId {
        self.id
    }

    /// Read-only, order-preserving view of the current lines.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of lines (distinct products), not items.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add a product to the cart, merging into its existing line if present.
    ///
    /// A repeated add of the same product increments the line's quantity;
    /// otherwise a new line is appended. Non-positive quantities are a
    /// caller error and leave the cart untouched.
    pub fn add_item(&mut self, product: &Product, quantity: i64) -> DomainResult<()> {
        if quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }

        match self
            .lines
            .iter_mut()
            .find(|line| line.line_id == product.id_typed())
        {
            Some(line) => line.quantity += quantity,
            None => self.lines.push(CartLine::new(product.clone(), quantity)),
        }

        self.version += 1;
        Ok(())
    }

    /// Remove the line matching `product_id`, if any.
    ///
    /// Removing an absent product is a no-op, not an error; the return value
    /// reports whether a line was actually removed.
    pub fn remove_line(&mut self, product_id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.line_id != product_id);

        let removed = self.lines.len() != before;
        if removed {
            self.version += 1;
        }
        removed
    }

    /// Empty the cart. Idempotent.
    pub fn clear(&mut self) {
        if self.lines.is_empty() {
            return;
        }
        self.lines.clear();
        self.version += 1;
    }

    /// Total number of items across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(CartLine::quantity).sum()
    }

    /// Σ(unit price × quantity) over all lines; zero for an empty cart.
    pub fn total_value(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Average item value: total value divided by total quantity.
    ///
    /// Undefined for an empty cart. The division has no meaningful result
    /// there, so this surfaces `InvalidState` instead of inventing a zero
    /// (which would be indistinguishable from a cart of free items).
    pub fn average_value(&self) -> DomainResult<Decimal> {
        let quantity = self.total_quantity();
        if quantity == 0 {
            return Err(DomainError::invalid_state(
                "average value is undefined for an empty cart",
            ));
        }
        Ok(self.total_value() / Decimal::from(quantity))
    }

    /// Look up the product carried by the line matching `product_id`.
    ///
    /// `None` for an absent product, never an error.
    pub fn find_product(&self, product_id: ProductId) -> Option<&Product> {
        self.line(product_id).map(CartLine::product)
    }

    /// Look up the whole line matching `product_id`.
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.line_id == product_id)
    }

    /// Line at `index` (0-based) in current display order.
    pub fn line_by_index(&self, index: usize) -> DomainResult<&CartLine> {
        self.lines
            .get(index)
            .ok_or_else(|| DomainError::index_out_of_range(index, self.lines.len()))
    }
}

impl AggregateRoot for Cart {
    type Id = CartId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use storefront_products::Price;

    fn test_cart() -> Cart {
        Cart::new(CartId::new(AggregateId::new()))
    }

    fn test_product(name: &str, price_minor: i64) -> Product {
        Product::new(
            ProductId::new(AggregateId::new()),
            name,
            format!("{name} (test catalog)"),
            Price::new(Decimal::new(price_minor, 2)).unwrap(),
        )
    }

    #[test]
    fn adding_the_same_product_merges_into_one_line() {
        let mut cart = test_cart();
        let tablet = test_product("tablet", 1000);

        cart.add_item(&tablet, 2).unwrap();
        cart.add_item(&tablet, 3).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.lines()[0].quantity(), 5);
        assert_eq!(cart.lines()[0].line_id(), tablet.id_typed());
    }

    #[test]
    fn adding_distinct_products_preserves_insertion_order() {
        let mut cart = test_cart();
        let tablet = test_product("tablet", 1000);
        let charger = test_product("charger", 500);

        cart.add_item(&tablet, 1).unwrap();
        cart.add_item(&charger, 1).unwrap();

        let names: Vec<&str> = cart.lines().iter().map(|l| l.product().name()).collect();
        assert_eq!(names, vec!["tablet", "charger"]);
    }

    #[test]
    fn add_rejects_non_positive_quantity() {
        let mut cart = test_cart();
        let tablet = test_product("tablet", 1000);

        for quantity in [0, -1, -42] {
            let err = cart.add_item(&tablet, quantity).unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }

        assert!(cart.is_empty());
        assert_eq!(cart.version(), 0);
    }

    #[test]
    fn removing_an_absent_product_is_a_noop() {
        let mut cart = test_cart();
        let tablet = test_product("tablet", 1000);
        cart.add_item(&tablet, 1).unwrap();
        let version = cart.version();

        let removed = cart.remove_line(ProductId::new(AggregateId::new()));

        assert!(!removed);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.version(), version);
    }

    #[test]
    fn removing_a_line_drops_the_whole_line() {
        let mut cart = test_cart();
        let tablet = test_product("tablet", 1000);
        let charger = test_product("charger", 500);
        cart.add_item(&tablet, 3).unwrap();
        cart.add_item(&charger, 1).unwrap();

        assert!(cart.remove_line(tablet.id_typed()));

        assert_eq!(cart.len(), 1);
        assert!(cart.find_product(tablet.id_typed()).is_none());
    }

    #[test]
    fn clear_empties_the_cart_and_is_idempotent() {
        let mut cart = test_cart();
        cart.add_item(&test_product("tablet", 1000), 2).unwrap();

        cart.clear();
        assert!(cart.lines().is_empty());
        assert_eq!(cart.total_value(), Decimal::ZERO);

        let version = cart.version();
        cart.clear();
        assert_eq!(cart.version(), version);
    }

    #[test]
    fn total_value_of_an_empty_cart_is_zero() {
        assert_eq!(test_cart().total_value(), Decimal::ZERO);
    }

    #[test]
    fn totals_and_average_over_mixed_lines() {
        let mut cart = test_cart();
        let tablet = test_product("tablet", 1000);
        let charger = test_product("charger", 500);

        cart.add_item(&tablet, 2).unwrap();
        cart.add_item(&charger, 1).unwrap();

        assert_eq!(cart.total_value(), Decimal::new(2500, 2));
        assert_eq!(cart.total_quantity(), 3);
        assert_eq!(
            cart.average_value().unwrap().round_dp(2),
            Decimal::new(833, 2)
        );
    }

    #[test]
    fn average_of_an_empty_cart_is_invalid_state() {
        let cart = test_cart();
        assert!(matches!(
            cart.average_value(),
            Err(DomainError::InvalidState(_))
        ));
    }

    #[test]
    fn find_product_returns_the_stored_snapshot() {
        let mut cart = test_cart();
        let tablet = test_product("tablet", 1000);
        cart.add_item(&tablet, 1).unwrap();

        let found = cart.find_product(tablet.id_typed()).unwrap();
        assert_eq!(found, &tablet);
    }

    #[test]
    fn line_by_index_follows_display_order() {
        let mut cart = test_cart();
        let tablet = test_product("tablet", 1000);
        let charger = test_product("charger", 500);
        cart.add_item(&tablet, 1).unwrap();
        cart.add_item(&charger, 1).unwrap();

        assert_eq!(cart.line_by_index(0).unwrap().line_id(), tablet.id_typed());
        assert_eq!(cart.line_by_index(1).unwrap().line_id(), charger.id_typed());
    }

    #[test]
    fn line_by_index_at_line_count_is_out_of_range() {
        let mut cart = test_cart();
        cart.add_item(&test_product("tablet", 1000), 1).unwrap();

        let err = cart.line_by_index(1).unwrap_err();
        assert_eq!(err, DomainError::IndexOutOfRange { index: 1, len: 1 });
    }

    #[test]
    fn version_increments_once_per_state_change() {
        let mut cart = test_cart();
        let tablet = test_product("tablet", 1000);

        cart.add_item(&tablet, 1).unwrap();
        cart.add_item(&tablet, 1).unwrap();
        cart.remove_line(tablet.id_typed());
        cart.clear();

        // Two adds + one removal; the clear of an already-empty cart is not
        // a state change.
        assert_eq!(cart.version(), 3);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: any sequence of positive adds of one product collapses
        /// to a single line whose quantity is the sum of the adds.
        #[test]
        fn repeated_adds_sum_quantities(
            quantities in prop::collection::vec(1i64..1_000i64, 1..10)
        ) {
            let mut cart = test_cart();
            let tablet = test_product("tablet", 1000);

            for quantity in &quantities {
                cart.add_item(&tablet, *quantity).unwrap();
            }

            prop_assert_eq!(cart.len(), 1);
            prop_assert_eq!(cart.total_quantity(), quantities.iter().sum::<i64>());
        }

        /// Property: the total is a sum over lines, so insertion order must
        /// not matter.
        #[test]
        fn total_value_is_insertion_order_independent(
            items in prop::collection::vec((0i64..100_000i64, 1i64..100i64), 1..8)
        ) {
            let products: Vec<Product> = items
                .iter()
                .enumerate()
                .map(|(i, (price_minor, _))| {
                    test_product(&format!("product-{i}"), *price_minor)
                })
                .collect();

            let mut forward = test_cart();
            for (product, (_, quantity)) in products.iter().zip(&items) {
                forward.add_item(product, *quantity).unwrap();
            }

            let mut reversed = test_cart();
            for (product, (_, quantity)) in products.iter().zip(&items).rev() {
                reversed.add_item(product, *quantity).unwrap();
            }

            prop_assert_eq!(forward.total_value(), reversed.total_value());
        }
    }
}

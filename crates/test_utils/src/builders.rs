//! Test Data Builders
//!
//! Builder patterns for constructing test data with sensible defaults.
//! Tests specify only the fields they care about.

use core_kernel::{BuyerId, Currency, Money, ProductId, ShopId};
use domain_catalog::{Product, ProductDraft};
use domain_orders::{Order, OrderLine, OrderStatus};

use crate::fixtures::{MoneyFixtures, StringFixtures};

/// Builder for test products
pub struct TestProductBuilder {
    shop_id: ShopId,
    title: String,
    description: String,
    price: Money,
    image_url: Option<String>,
}

impl Default for TestProductBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestProductBuilder {
    /// Creates a builder with default values
    pub fn new() -> Self {
        Self {
            shop_id: ShopId::new(),
            title: StringFixtures::product_title().to_string(),
            description: "A fine product".to_string(),
            price: MoneyFixtures::mru_price(),
            image_url: None,
        }
    }

    /// Sets the shop
    pub fn with_shop(mut self, shop_id: ShopId) -> Self {
        self.shop_id = shop_id;
        self
    }

    /// Sets the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the price
    pub fn with_price(mut self, price: Money) -> Self {
        self.price = price;
        self
    }

    /// Builds the product
    pub fn build(self) -> Product {
        Product::from_draft(ProductDraft {
            shop_id: self.shop_id,
            title: self.title,
            description: self.description,
            price: self.price,
            image_url: self.image_url,
        })
        .expect("test product must be valid")
    }
}

/// Builder for test orders
pub struct TestOrderBuilder {
    buyer_id: BuyerId,
    lines: Vec<OrderLine>,
    status: OrderStatus,
}

impl Default for TestOrderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestOrderBuilder {
    /// Creates a builder producing a Pending single-line order of 1000.00 MRU
    pub fn new() -> Self {
        Self {
            buyer_id: BuyerId::new(),
            lines: vec![OrderLine::new(
                ProductId::new(),
                StringFixtures::product_title(),
                1,
                MoneyFixtures::mru_1000(),
            )],
            status: OrderStatus::Pending,
        }
    }

    /// Sets the buyer
    pub fn with_buyer(mut self, buyer_id: BuyerId) -> Self {
        self.buyer_id = buyer_id;
        self
    }

    /// Replaces the lines with a single line of the given total
    pub fn with_total(mut self, total: Money) -> Self {
        self.lines = vec![OrderLine::new(
            ProductId::new(),
            StringFixtures::product_title(),
            1,
            total,
        )];
        self
    }

    /// Replaces the lines
    pub fn with_lines(mut self, lines: Vec<OrderLine>) -> Self {
        self.lines = lines;
        self
    }

    /// Adds a line
    pub fn add_line(mut self, product_id: ProductId, quantity: u32, unit_price: Money) -> Self {
        self.lines
            .push(OrderLine::new(product_id, "Extra item", quantity, unit_price));
        self
    }

    /// Builds the order in the AwaitingConfirmation state
    pub fn awaiting_confirmation(mut self) -> Self {
        self.status = OrderStatus::AwaitingConfirmation;
        self
    }

    /// Builds the order in the Paid state
    pub fn paid(mut self) -> Self {
        self.status = OrderStatus::Paid;
        self
    }

    /// Builds the test order, walking the status machine to the target state
    pub fn build(self) -> Order {
        let mut order =
            Order::checkout(self.buyer_id, self.lines).expect("test order must be valid");

        match self.status {
            OrderStatus::Pending => {}
            OrderStatus::AwaitingConfirmation => {
                order
                    .transition(OrderStatus::AwaitingConfirmation)
                    .expect("pending order can await confirmation");
            }
            OrderStatus::Paid => {
                order.mark_paid(None).expect("pending order can be paid");
            }
            OrderStatus::Shipped => {
                order.mark_paid(None).expect("pending order can be paid");
                order
                    .transition(OrderStatus::Shipped)
                    .expect("paid order can ship");
            }
        }
        order
    }
}

/// Convenience: a pending order with the given total in minor units
pub fn pending_order_with_total(minor: i64) -> Order {
    TestOrderBuilder::new()
        .with_total(Money::from_minor(minor, Currency::MRU))
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_builder_defaults() {
        let order = TestOrderBuilder::new().build();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total.amount(), dec!(1000.00));
    }

    #[test]
    fn test_order_builder_walks_to_paid() {
        let order = TestOrderBuilder::new().paid().build();
        assert_eq!(order.status, OrderStatus::Paid);
        assert!(order.paid_at.is_some());
    }

    #[test]
    fn test_product_builder() {
        let product = TestProductBuilder::new().with_title("Teapot").build();
        assert_eq!(product.title, "Teapot");
        assert!(product.price.is_positive());
    }
}

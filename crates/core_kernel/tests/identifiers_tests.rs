//! Unit tests for the Identifiers module
//!
//! Tests cover identifier creation, parsing, conversion, and display
//! formatting for the marketplace entity ids.

use core_kernel::{
    BuyerId, CommissionId, LocalPaymentId, OrderId, ProductId, SellerId, ShopId,
};
use uuid::Uuid;

mod order_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let id1 = OrderId::new();
        let id2 = OrderId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_new_v7_generates_time_ordered_ids() {
        let id1 = OrderId::new_v7();
        std::thread::sleep(std::time::Duration::from_millis(1));
        let id2 = OrderId::new_v7();
        let uuid1: Uuid = id1.into();
        let uuid2: Uuid = id2.into();
        assert!(uuid1 < uuid2);
    }

    #[test]
    fn test_display_includes_prefix() {
        let id = OrderId::new();
        assert!(id.to_string().starts_with("ORD-"));
    }

    #[test]
    fn test_parse_with_and_without_prefix() {
        let id = OrderId::new();
        let with_prefix: OrderId = id.to_string().parse().unwrap();
        let bare: OrderId = id.as_uuid().to_string().parse().unwrap();
        assert_eq!(with_prefix, id);
        assert_eq!(bare, id);
    }
}

mod prefixes {
    use super::*;

    #[test]
    fn test_each_id_type_has_distinct_prefix() {
        let prefixes = [
            ShopId::prefix(),
            ProductId::prefix(),
            OrderId::prefix(),
            BuyerId::prefix(),
            SellerId::prefix(),
            LocalPaymentId::prefix(),
            CommissionId::prefix(),
        ];
        let mut deduped = prefixes.to_vec();
        deduped.sort();
        deduped.dedup();
        assert_eq!(deduped.len(), prefixes.len());
    }
}

mod conversion {
    use super::*;

    #[test]
    fn test_uuid_round_trip() {
        let uuid = Uuid::new_v4();
        let id = LocalPaymentId::from(uuid);
        let back: Uuid = id.into();
        assert_eq!(uuid, back);
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = ProductId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
    }
}

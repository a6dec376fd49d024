//! Gift list: listing, payment codes and reservations

use crate::core::error::{EntityError, StorageError, ValidationError};
use crate::core::{ConditionalUpdate, DataService, Entity, OrderBy, SiteError, SiteResult};
use crate::entities::Gift;
use crate::pix::{Merchant, PaymentRequest, format_amount};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Payment details shown when a guest picks a gift
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GiftPayment {
    pub gift_id: Uuid,
    pub name: String,
    /// Amount with two fractional digits, as printed in the code
    pub amount: String,
    /// Pix copy-and-paste payload
    pub payload: String,
}

/// Operations behind the gift list page
#[derive(Clone)]
pub struct GiftService {
    gifts: Arc<dyn DataService<Gift>>,
    merchant: Arc<Merchant>,
}

impl GiftService {
    pub fn new(gifts: Arc<dyn DataService<Gift>>, merchant: Merchant) -> Self {
        Self {
            gifts,
            merchant: Arc::new(merchant),
        }
    }

    /// All gifts, cheapest first
    pub async fn list(&self) -> SiteResult<Vec<Gift>> {
        let gifts = self
            .gifts
            .list(&OrderBy::asc("price"))
            .await
            .map_err(|e| StorageError::query(Gift::table_name(), e))?;
        tracing::debug!(count = gifts.len(), "Listed gifts");
        Ok(gifts)
    }

    /// Fetch one gift
    pub async fn get(&self, id: &Uuid) -> SiteResult<Gift> {
        self.gifts
            .get(id)
            .await
            .map_err(|e| StorageError::query(Gift::table_name(), e))?
            .ok_or_else(|| {
                EntityError::NotFound {
                    entity_type: Gift::entity_name().to_string(),
                    id: *id,
                }
                .into()
            })
    }

    /// Build the payment code for a gift
    ///
    /// The code is computed on every call from the gift's name and price.
    pub async fn payment(&self, id: &Uuid) -> SiteResult<GiftPayment> {
        let gift = self.get(id).await?;
        Ok(self.payment_for(&gift))
    }

    /// Build the payment code for an already loaded gift
    pub fn payment_for(&self, gift: &Gift) -> GiftPayment {
        GiftPayment {
            gift_id: gift.id,
            name: gift.name.clone(),
            amount: format_amount(gift.price),
            payload: PaymentRequest::new(&self.merchant, gift.price, &gift.name).encode(),
        }
    }

    /// Payment code for a free contribution not tied to a listed gift
    pub fn contribution(&self, amount: Decimal, description: &str) -> SiteResult<String> {
        contribution_payload(&self.merchant, amount, description)
    }

    /// Reserve a gift in a guest's name
    pub async fn reserve(&self, id: &Uuid, buyer_name: &str) -> SiteResult<Gift> {
        let buyer_name = buyer_name.trim();
        if buyer_name.is_empty() {
            tracing::warn!(gift_id = %id, "Reservation without buyer name");
            return Err(ValidationError::FieldError {
                field: "buyer_name".to_string(),
                message: "Campo obrigatório".to_string(),
            }
            .into());
        }

        let gift = self.get(id).await?;
        if gift.is_purchased {
            return Err(already_reserved(id, &gift));
        }

        let mut reserved = gift;
        reserved.reserve(buyer_name);
        let outcome = self
            .gifts
            .update_if(id, reserved, &|stored: &Gift| !stored.is_purchased)
            .await
            .map_err(|e| StorageError::query(Gift::table_name(), e))?;

        let gift = match outcome {
            ConditionalUpdate::Updated(gift) => gift,
            ConditionalUpdate::Rejected(stored) => {
                tracing::warn!(gift_id = %id, buyer = %buyer_name, "Gift reserved concurrently");
                return Err(already_reserved(id, &stored));
            }
            ConditionalUpdate::Missing => {
                return Err(EntityError::NotFound {
                    entity_type: Gift::entity_name().to_string(),
                    id: *id,
                }
                .into());
            }
        };

        tracing::info!(gift_id = %id, gift = %gift.name, buyer = %buyer_name, "Gift reserved");
        Ok(gift)
    }
}

/// Payment code for a free amount, which must be positive
pub fn contribution_payload(
    merchant: &Merchant,
    amount: Decimal,
    description: &str,
) -> SiteResult<String> {
    if amount <= Decimal::ZERO {
        return Err(ValidationError::FieldError {
            field: "amount".to_string(),
            message: "O valor deve ser positivo".to_string(),
        }
        .into());
    }
    Ok(PaymentRequest::new(merchant, amount, description).encode())
}

fn already_reserved(id: &Uuid, gift: &Gift) -> SiteError {
    EntityError::AlreadyReserved {
        id: *id,
        purchased_by: gift.purchased_by.clone().unwrap_or_default(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pix::decode_payload;
    use crate::storage::InMemoryDataService;

    fn merchant() -> Merchant {
        Merchant::new("09261139680", "Pauline Cerqueira Barbosa", "Cataguases")
    }

    fn service_with(gifts: Vec<Gift>) -> GiftService {
        GiftService::new(Arc::new(InMemoryDataService::with_rows(gifts)), merchant())
    }

    #[tokio::test]
    async fn test_list_cheapest_first() {
        let service = service_with(vec![
            Gift::new("Geladeira", Decimal::from(3500)),
            Gift::new("Toalhas", Decimal::from(90)),
        ]);

        let gifts = service.list().await.unwrap();
        assert_eq!(gifts[0].name, "Toalhas");
        assert_eq!(gifts[1].name, "Geladeira");
    }

    #[tokio::test]
    async fn test_payment_uses_name_and_price() {
        let gift = Gift::new("Jogo de Panelas", Decimal::from(150));
        let service = service_with(vec![gift.clone()]);

        let payment = service.payment(&gift.id).await.unwrap();
        assert_eq!(payment.amount, "150.00");
        assert!(payment.payload.ends_with("6304A067"));

        let decoded = decode_payload(&payment.payload).unwrap();
        assert_eq!(decoded.description(), Some("Jogo de Panelas"));
    }

    #[tokio::test]
    async fn test_payment_for_unknown_gift() {
        let service = service_with(vec![]);
        let err = service.payment(&Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, SiteError::Entity(EntityError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_reserve_once() {
        let gift = Gift::new("Jogo de Panelas", Decimal::from(150));
        let service = service_with(vec![gift.clone()]);

        let reserved = service.reserve(&gift.id, "  Tia Rosa ").await.unwrap();
        assert!(reserved.is_purchased);
        assert_eq!(reserved.purchased_by.as_deref(), Some("Tia Rosa"));

        let err = service.reserve(&gift.id, "Primo Zé").await.unwrap_err();
        match err {
            SiteError::Entity(EntityError::AlreadyReserved { purchased_by, .. }) => {
                assert_eq!(purchased_by, "Tia Rosa");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_reserve_requires_name() {
        let gift = Gift::new("Jogo de Panelas", Decimal::from(150));
        let service = service_with(vec![gift.clone()]);

        let err = service.reserve(&gift.id, "   ").await.unwrap_err();
        assert!(matches!(err, SiteError::Validation(_)));
        assert!(!service.get(&gift.id).await.unwrap().is_purchased);
    }

    #[test]
    fn test_contribution() {
        let service = service_with(vec![]);
        let payload = service
            .contribution(Decimal::from(50), "Lua de mel")
            .unwrap();
        assert!(payload.contains("540550.00"));
        assert!(service.contribution(Decimal::ZERO, "Lua de mel").is_err());
    }

    #[test]
    fn test_contribution_payload_rejects_non_positive() {
        for amount in [Decimal::ZERO, Decimal::new(-1050, 2)] {
            let err = contribution_payload(&merchant(), amount, "Lua de mel").unwrap_err();
            assert!(matches!(
                err,
                SiteError::Validation(ValidationError::FieldError { ref field, .. }) if field == "amount"
            ));
        }
        assert!(contribution_payload(&merchant(), Decimal::new(1, 2), "").is_ok());
    }
}

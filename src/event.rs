use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event published when a user registers a new payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodCreated {
  #[serde(rename = "eventID")]
  pub event_id: Uuid,
  #[serde(rename = "userID")]
  pub user_id: Uuid,
  #[serde(rename = "paymentMethodID")]
  pub payment_method_id: Uuid,
  #[serde(rename = "paymentMethodType")]
  pub payment_method_type: PaymentMethodType,
}

/// The kind of payment method a user registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethodType {
  Card,
  BankAccount,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decodes_card_payload() {
    let payload = r#"{
      "eventID": "01890a5a-f410-7c66-a7dc-7723a5ff72bb",
      "userID": "01890a5a-f410-7c66-a7dc-7723a5ff72bc",
      "paymentMethodID": "01890a5a-f410-7c66-a7dc-7723a5ff72bd",
      "paymentMethodType": "card"
    }"#;

    let event: PaymentMethodCreated = serde_json::from_str(payload).unwrap();
    assert_eq!(event.payment_method_type, PaymentMethodType::Card);
    assert_eq!(
      event.event_id,
      "01890a5a-f410-7c66-a7dc-7723a5ff72bb".parse::<Uuid>().unwrap()
    );
  }

  #[test]
  fn decodes_bank_account_payload() {
    let payload = r#"{
      "eventID": "01890a5a-f410-7c66-a7dc-7723a5ff72bb",
      "userID": "01890a5a-f410-7c66-a7dc-7723a5ff72bc",
      "paymentMethodID": "01890a5a-f410-7c66-a7dc-7723a5ff72bd",
      "paymentMethodType": "bank_account"
    }"#;

    let event: PaymentMethodCreated = serde_json::from_str(payload).unwrap();
    assert_eq!(event.payment_method_type, PaymentMethodType::BankAccount);
  }

  #[test]
  fn rejects_unknown_payment_method_type() {
    let payload = r#"{
      "eventID": "01890a5a-f410-7c66-a7dc-7723a5ff72bb",
      "userID": "01890a5a-f410-7c66-a7dc-7723a5ff72bc",
      "paymentMethodID": "01890a5a-f410-7c66-a7dc-7723a5ff72bd",
      "paymentMethodType": "carrier_pigeon"
    }"#;

    assert!(serde_json::from_str::<PaymentMethodCreated>(payload).is_err());
  }

  #[test]
  fn rejects_malformed_json() {
    assert!(serde_json::from_str::<PaymentMethodCreated>("{not json").is_err());
  }

  #[test]
  fn wire_field_names_survive_round_trip() {
    let event = PaymentMethodCreated {
      event_id: Uuid::now_v7(),
      user_id: Uuid::now_v7(),
      payment_method_id: Uuid::now_v7(),
      payment_method_type: PaymentMethodType::Card,
    };

    let json = serde_json::to_value(&event).unwrap();
    assert!(json.get("eventID").is_some());
    assert!(json.get("userID").is_some());
    assert!(json.get("paymentMethodID").is_some());
    assert_eq!(json["paymentMethodType"], "card");
  }
}

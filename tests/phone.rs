use pizzeria_api::{error::AppError, phone::normalize_phone};

#[test]
fn formats_every_accepted_spelling() {
    for raw in ["+7 999 777-77-77", "89997777777", "7(999)777 77 77", "9997777777"] {
        assert_eq!(normalize_phone(raw).expect(raw), "+7 999 777-77-77");
    }
}

#[test]
fn rejects_wrong_lengths_and_prefixes() {
    for raw in ["", "12345", "+1 999 777-77-77", "+7 999 777-77-777"] {
        assert!(
            matches!(normalize_phone(raw), Err(AppError::BadRequest(_))),
            "{raw}"
        );
    }
}

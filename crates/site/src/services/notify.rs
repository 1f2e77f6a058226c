//! Outbound notification composition.
//!
//! The café relays orders and booking requests over WhatsApp by hand, so
//! instead of calling a messaging API the site composes the exact text a
//! staff member would forward and appends it to the notification log
//! together with the recipient number and the raw payload.

use serde_json::json;

use jungle_park_core::{BannerId, ProgramId};

use crate::models::notification::{NotificationEntry, NotificationKind};
use crate::models::settings::Settings;
use crate::store::{JsonStore, NotificationLog, StoreError};

/// Details of a confirmed delivery order.
#[derive(Debug)]
pub struct OrderNotice<'a> {
    pub items: &'a [String],
    pub total: i64,
    pub address: &'a str,
    pub phone: &'a str,
}

/// Details of a program booking request.
#[derive(Debug)]
pub struct ProgramNotice<'a> {
    pub program_id: ProgramId,
    pub title: &'a str,
    pub name: &'a str,
    pub child_name: &'a str,
    pub date: &'a str,
    pub phone: &'a str,
}

/// Details of a seasonal banner signup.
#[derive(Debug)]
pub struct SignupNotice<'a> {
    pub banner_id: BannerId,
    pub title: &'a str,
    pub child_name: &'a str,
    pub parent_name: &'a str,
    pub age: &'a str,
    pub phone: &'a str,
}

/// Composes notification messages and appends them to the log.
pub struct Notifier<'a> {
    log: NotificationLog<'a>,
}

impl<'a> Notifier<'a> {
    /// Create a new notifier.
    #[must_use]
    pub const fn new(store: &'a JsonStore) -> Self {
        Self {
            log: NotificationLog::new(store),
        }
    }

    /// Record an order notification addressed to the café number.
    ///
    /// Returns the composed message.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the log cannot be appended.
    pub async fn order(
        &self,
        settings: &Settings,
        notice: OrderNotice<'_>,
    ) -> Result<String, StoreError> {
        let message = order_message(&notice);
        let payload = json!({
            "items": notice.items,
            "total": notice.total,
            "address": notice.address,
            "phone": notice.phone,
        });

        self.log
            .append(NotificationEntry::new(
                NotificationKind::Order,
                &settings.cafe_number,
                &message,
                payload,
            ))
            .await?;

        Ok(message)
    }

    /// Record a program request notification addressed to the cashier.
    ///
    /// Returns the composed message.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the log cannot be appended.
    pub async fn program_request(
        &self,
        settings: &Settings,
        notice: ProgramNotice<'_>,
    ) -> Result<String, StoreError> {
        let message = program_request_message(&notice);
        let payload = json!({
            "programId": notice.program_id,
            "name": notice.name,
            "childName": notice.child_name,
            "date": notice.date,
            "phone": notice.phone,
        });

        self.log
            .append(NotificationEntry::new(
                NotificationKind::Program,
                &settings.cashier_number,
                &message,
                payload,
            ))
            .await?;

        Ok(message)
    }

    /// Record a banner signup notification addressed to the cashier.
    ///
    /// Returns the composed message.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the log cannot be appended.
    pub async fn banner_signup(
        &self,
        settings: &Settings,
        notice: SignupNotice<'_>,
    ) -> Result<String, StoreError> {
        let message = banner_signup_message(&notice);
        let payload = json!({
            "bannerId": notice.banner_id,
            "childName": notice.child_name,
            "parentName": notice.parent_name,
            "age": notice.age,
            "phone": notice.phone,
        });

        self.log
            .append(NotificationEntry::new(
                NotificationKind::Program,
                &settings.cashier_number,
                &message,
                payload,
            ))
            .await?;

        Ok(message)
    }
}

// =============================================================================
// Message Formats
// =============================================================================

// The texts are fixed Russian regardless of the visitor language; staff
// read them, not customers.

fn order_message(notice: &OrderNotice<'_>) -> String {
    format!(
        "📦 Новый заказ из кафе Jungle Park:\n\
         Позиции: {}\n\
         Общая сумма: {} тг\n\
         Адрес: {}\n\
         Телефон клиента: {}",
        notice.items.join(", "),
        notice.total,
        notice.address,
        notice.phone,
    )
}

fn program_request_message(notice: &ProgramNotice<'_>) -> String {
    format!(
        "🎉 Новая заявка на программу Jungle Park:\n\
         Программа: {}\n\
         Имя ребёнка: {}\n\
         Дата: {}\n\
         Контакт: {}",
        notice.title, notice.child_name, notice.date, notice.phone,
    )
}

fn banner_signup_message(notice: &SignupNotice<'_>) -> String {
    format!(
        "🎉 Новая заявка на программу Jungle Park:\n\
         Программа: {}\n\
         Имя ребёнка: {}\n\
         Возраст: {}\n\
         Контакт: {}\n\
         ФИ родителя: {}",
        notice.title, notice.child_name, notice.age, notice.phone, notice.parent_name,
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_message_format() {
        let items = vec!["Манты ×2".to_string(), "Лимонад".to_string()];
        let message = order_message(&OrderNotice {
            items: &items,
            total: 2500,
            address: "ул. Достык 12",
            phone: "+7 701 000 0000",
        });

        assert_eq!(
            message,
            "📦 Новый заказ из кафе Jungle Park:\n\
             Позиции: Манты ×2, Лимонад\n\
             Общая сумма: 2500 тг\n\
             Адрес: ул. Достык 12\n\
             Телефон клиента: +7 701 000 0000"
        );
    }

    #[test]
    fn test_program_message_format() {
        let message = program_request_message(&ProgramNotice {
            program_id: ProgramId::generate(),
            title: "Пиратская вечеринка",
            name: "Айгерим",
            child_name: "Тимур",
            date: "2025-09-01",
            phone: "+7 702 000 0000",
        });

        assert_eq!(
            message,
            "🎉 Новая заявка на программу Jungle Park:\n\
             Программа: Пиратская вечеринка\n\
             Имя ребёнка: Тимур\n\
             Дата: 2025-09-01\n\
             Контакт: +7 702 000 0000"
        );
    }

    #[test]
    fn test_signup_message_includes_age_and_parent() {
        let message = banner_signup_message(&SignupNotice {
            banner_id: BannerId::generate(),
            title: "Новогодняя ёлка",
            child_name: "Алия",
            parent_name: "Сауле Ахметова",
            age: "6",
            phone: "+7 703 000 0000",
        });

        assert_eq!(
            message,
            "🎉 Новая заявка на программу Jungle Park:\n\
             Программа: Новогодняя ёлка\n\
             Имя ребёнка: Алия\n\
             Возраст: 6\n\
             Контакт: +7 703 000 0000\n\
             ФИ родителя: Сауле Ахметова"
        );
    }

    #[tokio::test]
    async fn test_order_appends_entry_with_cafe_recipient() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let notifier = Notifier::new(&store);
        let settings = Settings::default();

        let items = vec!["Плов".to_string()];
        notifier
            .order(
                &settings,
                OrderNotice {
                    items: &items,
                    total: 1800,
                    address: "пр. Кабанбай батыра 5",
                    phone: "+7 701 111 2233",
                },
            )
            .await
            .unwrap();

        let entries = NotificationLog::new(&store).list().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].kind, NotificationKind::Order);
        assert_eq!(entries[0].recipient, settings.cafe_number);
        assert_eq!(entries[0].payload["total"], 1800);
    }

    #[tokio::test]
    async fn test_program_request_goes_to_cashier() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        let notifier = Notifier::new(&store);
        let settings = Settings::default();

        notifier
            .program_request(
                &settings,
                ProgramNotice {
                    program_id: ProgramId::generate(),
                    title: "Джунгли-квест",
                    name: "Мадина",
                    child_name: "Арсен",
                    date: "2025-10-12",
                    phone: "+7 705 222 3344",
                },
            )
            .await
            .unwrap();

        let entries = NotificationLog::new(&store).list().await.unwrap();
        assert_eq!(entries[0].recipient, settings.cashier_number);
        assert_eq!(entries[0].kind, NotificationKind::Program);
        assert_eq!(entries[0].payload["childName"], "Арсен");
    }
}

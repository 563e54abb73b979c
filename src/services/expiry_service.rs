//! Motor de notificaciones de caducidad
//!
//! Recorre los documentos y coches de un usuario, calcula los días que
//! faltan para cada fecha de caducidad y genera notificaciones para todo
//! lo que caduca dentro de la ventana. Es un recálculo puro: no persiste
//! nada y produce el mismo resultado para las mismas entradas.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::dto::notification_dto::ExpiryNotification;
use crate::models::car::Car;
use crate::models::document::{Document, DocumentType};
use crate::models::notification::ExpirySeverity;

/// Ventana de aviso: todo lo que caduque dentro de estos días genera aviso
pub const EXPIRY_WINDOW_DAYS: i64 = 30;

const MS_PER_DAY: f64 = 86_400_000.0;

/// Días hasta la caducidad, redondeando hacia arriba a nivel de milisegundo.
/// La fecha de caducidad se toma a medianoche UTC del día almacenado.
pub fn days_until_expiry(expiry: NaiveDate, now: DateTime<Utc>) -> i64 {
    let expiry_dt = expiry
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always a valid time")
        .and_utc();
    let ms = (expiry_dt - now).num_milliseconds();
    (ms as f64 / MS_PER_DAY).ceil() as i64
}

/// Comprobar si una fecha cae dentro de la ventana de aviso
fn within_window(expiry: NaiveDate, now: DateTime<Utc>) -> bool {
    let expiry_dt = expiry
        .and_hms_opt(0, 0, 0)
        .expect("midnight is always a valid time")
        .and_utc();
    expiry_dt <= now + Duration::days(EXPIRY_WINDOW_DAYS)
}

fn expiry_message(car_name: &str, what: &str, days: i64) -> String {
    if days > 0 {
        format!("{}'s {} expires in {} days", car_name, what, days)
    } else if days == 0 {
        format!("{}'s {} expires today", car_name, what)
    } else {
        format!("{}'s {} expired {} days ago", car_name, what, -days)
    }
}

fn expiry_title(label: &str, days: i64) -> String {
    if days <= 0 {
        format!("{} expired!", label)
    } else {
        format!("{} expiring soon!", label)
    }
}

/// Recalcular las notificaciones de caducidad de un usuario.
///
/// Se revisan tres fuentes: la fecha de caducidad de cada documento, el
/// PUC de cada coche y el seguro de cada coche.
pub fn scan_expiries(
    user_id: Uuid,
    cars: &[Car],
    documents: &[Document],
    now: DateTime<Utc>,
) -> Vec<ExpiryNotification> {
    let mut notifications = Vec::new();

    // Caducidades de documentos
    for doc in documents {
        let Some(expiry) = doc.expiry_date else {
            continue;
        };

        if !within_window(expiry, now) {
            continue;
        }

        let days = days_until_expiry(expiry, now);
        let car = cars.iter().find(|c| c.id == doc.car_id);
        let car_name = car.map(|c| c.car_name.as_str()).unwrap_or("Your car");
        let label = DocumentType::parse(&doc.doc_type)
            .map(|t| t.label())
            .unwrap_or_else(|| doc.doc_type.to_uppercase());

        notifications.push(ExpiryNotification {
            user_id,
            title: expiry_title(&label, days),
            message: expiry_message(car_name, &doc.doc_type, days),
            car_id: Some(doc.car_id),
            document_id: Some(doc.id),
            expiry_date: expiry,
            days_until_expiry: days,
            severity: ExpirySeverity::from_days(days),
        });
    }

    // Caducidades de cumplimiento del coche (PUC y seguro)
    for car in cars {
        if let Some(expiry) = car.puc_expiry {
            if within_window(expiry, now) {
                let days = days_until_expiry(expiry, now);
                notifications.push(ExpiryNotification {
                    user_id,
                    title: expiry_title("PUC", days),
                    message: expiry_message(&car.car_name, "PUC", days),
                    car_id: Some(car.id),
                    document_id: None,
                    expiry_date: expiry,
                    days_until_expiry: days,
                    severity: ExpirySeverity::from_days(days),
                });
            }
        }

        if let Some(expiry) = car.insurance_expiry {
            if within_window(expiry, now) {
                let days = days_until_expiry(expiry, now);
                notifications.push(ExpiryNotification {
                    user_id,
                    title: expiry_title("Insurance", days),
                    message: expiry_message(&car.car_name, "insurance", days),
                    car_id: Some(car.id),
                    document_id: None,
                    expiry_date: expiry,
                    days_until_expiry: days,
                    severity: ExpirySeverity::from_days(days),
                });
            }
        }
    }

    notifications
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn test_car(name: &str, puc: Option<NaiveDate>, insurance: Option<NaiveDate>) -> Car {
        let now = test_now();
        Car {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            car_name: name.to_string(),
            registration_number: "MH12AB1234".to_string(),
            chassis_number: None,
            engine_number: None,
            make: Some("Maruti".to_string()),
            model: Some("Swift".to_string()),
            year: Some("2020".to_string()),
            color: None,
            fuel_type: Some("petrol".to_string()),
            puc_expiry: puc,
            insurance_expiry: insurance,
            insurance_provider: None,
            notes: None,
            rc_book_url: None,
            insurance_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn test_document(car_id: Uuid, doc_type: &str, expiry: Option<NaiveDate>) -> Document {
        let now = test_now();
        Document {
            id: Uuid::new_v4(),
            car_id,
            user_id: Uuid::new_v4(),
            doc_type: doc_type.to_string(),
            name: format!("{} document", doc_type),
            expiry_date: expiry,
            file_url: None,
            uploaded_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_days_until_expiry_future() {
        // 2025-06-25 00:00 UTC está a 9.5 días de 2025-06-15 12:00 → ceil = 10
        assert_eq!(days_until_expiry(date(2025, 6, 25), test_now()), 10);
    }

    #[test]
    fn test_days_until_expiry_past_is_non_positive() {
        assert_eq!(days_until_expiry(date(2025, 6, 15), test_now()), 0);
        assert!(days_until_expiry(date(2025, 6, 10), test_now()) < 0);
    }

    #[test]
    fn test_expired_entities_have_non_positive_days() {
        let car = test_car("Swift", Some(date(2025, 6, 1)), None);
        let doc = test_document(car.id, "insurance", Some(date(2025, 5, 20)));
        let user_id = Uuid::new_v4();

        let result = scan_expiries(user_id, &[car], &[doc], test_now());

        assert_eq!(result.len(), 2);
        for notif in &result {
            assert!(notif.days_until_expiry <= 0);
            assert_eq!(notif.severity, ExpirySeverity::Expired);
            assert!(notif.title.contains("expired"));
        }
    }

    #[test]
    fn test_within_window_emits_expiring_soon() {
        let car = test_car("Swift", Some(date(2025, 7, 1)), None);
        let user_id = Uuid::new_v4();

        let result = scan_expiries(user_id, &[car], &[], test_now());

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].severity, ExpirySeverity::ExpiringSoon);
        assert_eq!(result[0].days_until_expiry, 16);
        assert_eq!(result[0].title, "PUC expiring soon!");
        assert_eq!(result[0].message, "Swift's PUC expires in 16 days");
    }

    #[test]
    fn test_outside_window_is_ignored() {
        // 40 días en el futuro: fuera de la ventana de 30
        let car = test_car("Swift", Some(date(2025, 7, 25)), Some(date(2025, 8, 30)));
        let doc = test_document(car.id, "rc", Some(date(2026, 1, 1)));

        let result = scan_expiries(Uuid::new_v4(), &[car], &[doc], test_now());

        assert!(result.is_empty());
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        // Exactamente now + 30 días (medianoche del 15 de julio está dentro,
        // porque now son las 12:00 del 15 de junio)
        let car = test_car("Swift", Some(date(2025, 7, 15)), None);

        let result = scan_expiries(Uuid::new_v4(), &[car], &[], test_now());

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].days_until_expiry, 30);
    }

    #[test]
    fn test_document_without_expiry_is_skipped() {
        let car = test_car("Swift", None, None);
        let doc = test_document(car.id, "rc", None);

        let result = scan_expiries(Uuid::new_v4(), &[car], &[doc], test_now());

        assert!(result.is_empty());
    }

    #[test]
    fn test_document_references_and_owner() {
        let car = test_car("Baleno", None, None);
        let doc = test_document(car.id, "puc", Some(date(2025, 6, 20)));
        let doc_id = doc.id;
        let car_id = car.id;
        let user_id = Uuid::new_v4();

        let result = scan_expiries(user_id, &[car], &[doc], test_now());

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].user_id, user_id);
        assert_eq!(result[0].car_id, Some(car_id));
        assert_eq!(result[0].document_id, Some(doc_id));
        assert_eq!(result[0].title, "PUC expiring soon!");
        assert!(result[0].message.starts_with("Baleno's puc"));
    }

    #[test]
    fn test_document_with_unknown_car_falls_back() {
        let doc = test_document(Uuid::new_v4(), "insurance", Some(date(2025, 6, 20)));

        let result = scan_expiries(Uuid::new_v4(), &[], &[doc], test_now());

        assert_eq!(result.len(), 1);
        assert!(result[0].message.starts_with("Your car's insurance"));
    }

    #[test]
    fn test_expires_today_message() {
        let car = test_car("Swift", None, Some(date(2025, 6, 15)));

        let result = scan_expiries(Uuid::new_v4(), &[car], &[], test_now());

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].message, "Swift's insurance expires today");
        assert_eq!(result[0].severity, ExpirySeverity::Expired);
    }
}

//! Promotional banners for the home page.

use serde::{Deserialize, Serialize};

use jungle_park_core::{BannerId, LocalizedText, MenuItemId, ProgramId};

/// What a banner advertises.
///
/// Serialized with an inline `type` tag so `banners.json` stays flat:
/// `{"id": ..., "type": "seasonal", "program_id": ..., ...}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BannerKind {
    /// Seasonal campaign pointing at a program, with a signup form.
    Seasonal {
        program_id: ProgramId,
        /// Call-to-action label, defaults to «Записаться» / «Тіркелу».
        #[serde(default = "default_cta")]
        cta: LocalizedText,
    },
    /// Discount promotion pointing at a menu item.
    Discount { menu_item_id: MenuItemId },
}

pub(crate) fn default_cta() -> LocalizedText {
    LocalizedText::new("Записаться", "Тіркелу")
}

/// A home page banner, as stored in `banners.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Banner {
    pub id: BannerId,
    #[serde(flatten)]
    pub kind: BannerKind,
    pub title: LocalizedText,
    #[serde(default)]
    pub description: LocalizedText,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl Banner {
    /// Only seasonal banners accept signups.
    #[must_use]
    pub const fn is_seasonal(&self) -> bool {
        matches!(self.kind, BannerKind::Seasonal { .. })
    }

    /// The program a seasonal banner signs visitors up for.
    #[must_use]
    pub const fn program_id(&self) -> Option<ProgramId> {
        match self.kind {
            BannerKind::Seasonal { program_id, .. } => Some(program_id),
            BannerKind::Discount { .. } => None,
        }
    }
}

const fn default_active() -> bool {
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_seasonal_banner_roundtrip_keeps_flat_tag() {
        let banner = Banner {
            id: BannerId::generate(),
            kind: BannerKind::Seasonal {
                program_id: ProgramId::generate(),
                cta: default_cta(),
            },
            title: LocalizedText::new("Новый год", "Жаңа жыл"),
            description: LocalizedText::default(),
            active: true,
        };

        let json = serde_json::to_value(&banner).unwrap();
        assert_eq!(json["type"], "seasonal");
        assert!(json.get("program_id").is_some());

        let parsed: Banner = serde_json::from_value(json).unwrap();
        assert!(parsed.is_seasonal());
        assert_eq!(parsed.program_id(), banner.program_id());
    }

    #[test]
    fn test_seasonal_cta_defaults() {
        let json = format!(
            r#"{{"id": "{}", "type": "seasonal", "program_id": "{}", "title": {{"ru": "Акция"}}}}"#,
            BannerId::generate(),
            ProgramId::generate()
        );
        let banner: Banner = serde_json::from_str(&json).unwrap();
        match banner.kind {
            BannerKind::Seasonal { cta, .. } => {
                assert_eq!(cta.ru, "Записаться");
                assert_eq!(cta.kk, "Тіркелу");
            }
            BannerKind::Discount { .. } => panic!("expected seasonal"),
        }
        assert!(banner.active);
    }

    #[test]
    fn test_discount_banner_accepts_no_signups() {
        let banner = Banner {
            id: BannerId::generate(),
            kind: BannerKind::Discount {
                menu_item_id: MenuItemId::generate(),
            },
            title: LocalizedText::new("Скидка", "Жеңілдік"),
            description: LocalizedText::default(),
            active: true,
        };
        assert!(!banner.is_seasonal());
        assert!(banner.program_id().is_none());
    }
}

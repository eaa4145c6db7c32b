//! Site settings models

use sqlx::FromRow;

/// Site settings singleton
#[derive(Debug, Clone, FromRow)]
pub struct SiteSettings {
    pub site_name: String,
    pub tagline: String,
    pub contact_email: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            site_name: "Hotel Azure".to_string(),
            tagline: "Boutique rooms above the old harbour".to_string(),
            contact_email: "stay@hotelazure.example".to_string(),
        }
    }
}

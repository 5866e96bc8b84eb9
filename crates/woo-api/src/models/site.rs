use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A WordPress.com site.
///
/// Decoded from `me/sites`; the store-related flags and the timezone are
/// nested under `options` in the payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Site {
    pub site_id: i64,
    pub name: String,
    pub description: String,
    pub url: String,
    /// Short plan name. Not part of the site payload; filled by a
    /// supplementary request, empty until then.
    pub plan: String,
    pub is_woocommerce_active: bool,
    pub is_wordpress_store: bool,
    /// TZ database name, may be empty for sites configured with a raw offset.
    pub timezone: String,
    /// UTC offset in hours, e.g. `-3.5`.
    pub gmt_offset: f64,
}

impl Site {
    /// The site's fixed UTC offset derived from `gmt_offset`.
    ///
    /// Falls back to UTC when the offset is outside the valid range.
    pub fn site_timezone(&self) -> FixedOffset {
        #[allow(clippy::cast_possible_truncation, clippy::as_conversions)]
        let seconds = (self.gmt_offset * 3600.0).round() as i32;
        FixedOffset::east_opt(seconds).unwrap_or_else(|| Utc.fix())
    }
}

#[derive(Deserialize)]
struct RawSite {
    #[serde(rename = "ID")]
    id: i64,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "URL")]
    url: String,
    options: RawSiteOptions,
}

#[derive(Deserialize)]
struct RawSiteOptions {
    #[serde(rename = "is_wpcom_store", default)]
    is_wordpress_store: bool,
    #[serde(rename = "woocommerce_is_active", default)]
    is_woocommerce_active: bool,
    #[serde(default)]
    timezone: String,
    #[serde(default, deserialize_with = "super::de::f64_lenient")]
    gmt_offset: f64,
}

impl<'de> Deserialize<'de> for Site {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawSite::deserialize(deserializer)?;
        Ok(Self {
            site_id: raw.id,
            name: raw.name,
            description: raw.description,
            url: raw.url,
            plan: String::new(),
            is_woocommerce_active: raw.options.is_woocommerce_active,
            is_wordpress_store: raw.options.is_wordpress_store,
            timezone: raw.options.timezone,
            gmt_offset: raw.options.gmt_offset,
        })
    }
}

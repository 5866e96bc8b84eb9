use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use super::de::{value_to_f64, value_to_i64};

/// A ranked list returned by `wc-analytics/leaderboards`.
///
/// Rows carry metrics only; display data for the ranked entities has to
/// be looked up separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub rows: Vec<LeaderboardRow>,
}

/// A single cell: pre-rendered `display` HTML plus the raw `value`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardRowContent {
    #[serde(default)]
    pub display: String,
    #[serde(default)]
    pub value: Value,
}

/// One ranked entry: subject, quantity, and total columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LeaderboardRowContent>", into = "Vec<LeaderboardRowContent>")]
pub struct LeaderboardRow {
    pub subject: LeaderboardRowContent,
    pub quantity: LeaderboardRowContent,
    pub total: LeaderboardRowContent,
}

impl LeaderboardRow {
    /// Product id encoded in the subject link, e.g.
    /// `<a href='...&products=9'>Beanie</a>` yields `9`.
    pub fn product_id(&self) -> Option<i64> {
        let href = extract_href(&self.subject.display)?;
        let href = href.replace("&amp;", "&");
        let url = Url::parse(&href).ok()?;
        url.query_pairs()
            .find(|(k, _)| k == "products")
            .and_then(|(_, v)| v.parse().ok())
    }

    /// Quantity column as an integer (items sold for product boards).
    pub fn quantity_value(&self) -> i64 {
        value_to_i64(&self.quantity.value).unwrap_or_default()
    }

    /// Total column as a decimal amount (net sales for product boards).
    pub fn total_value(&self) -> f64 {
        value_to_f64(&self.total.value).unwrap_or_default()
    }
}

impl TryFrom<Vec<LeaderboardRowContent>> for LeaderboardRow {
    type Error = String;

    fn try_from(cells: Vec<LeaderboardRowContent>) -> Result<Self, Self::Error> {
        let mut cells = cells.into_iter();
        match (cells.next(), cells.next(), cells.next()) {
            (Some(subject), Some(quantity), Some(total)) => Ok(Self {
                subject,
                quantity,
                total,
            }),
            _ => Err("leaderboard row needs subject, quantity and total cells".into()),
        }
    }
}

impl From<LeaderboardRow> for Vec<LeaderboardRowContent> {
    fn from(row: LeaderboardRow) -> Self {
        vec![row.subject, row.quantity, row.total]
    }
}

fn extract_href(html: &str) -> Option<&str> {
    let start = html.find("href=")? + "href=".len();
    let rest = html.get(start..)?;
    let quote = rest.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let rest = rest.get(1..)?;
    let end = rest.find(quote)?;
    rest.get(..end)
}

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::admin::store::AdminStore;
use crate::models::affiliate::AffiliateLink;

/// Lookup key for a course title: trimmed and lowercased. No other folding.
pub fn normalize_title(title: &str) -> String {
    title.trim().to_lowercase()
}

/// Course-title → affiliate link map. Lookups are exact on the normalized title.
#[derive(Debug, Clone, Default)]
pub struct AffiliateDirectory {
    by_title: HashMap<String, AffiliateLink>,
}

/// A course or resource name paired with its link, when one exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedCourse {
    pub title: String,
    /// What to display: the link's display text, else its title, else the
    /// suggested name as generated.
    pub label: String,
    pub link: Option<AffiliateLink>,
}

impl AffiliateDirectory {
    /// Builds the directory; the first link wins if two titles collide.
    pub fn from_links(links: impl IntoIterator<Item = AffiliateLink>) -> Self {
        let mut by_title = HashMap::new();
        for link in links {
            by_title.entry(normalize_title(&link.title)).or_insert(link);
        }
        Self { by_title }
    }

    /// Built-in links used when the database directory cannot be read.
    pub fn builtin() -> Self {
        let seed = [
            (
                1,
                "Introduction to Python",
                "https://www.coursera.org/specializations/python?irgwc=1",
                Some("Python for Everybody (Coursera)"),
            ),
            (
                2,
                "Machine Learning",
                "https://www.coursera.org/specializations/machine-learning-introduction?irgwc=1",
                Some("Machine Learning Specialization (Coursera)"),
            ),
            (
                3,
                "The Complete Web Development Bootcamp",
                "https://www.udemy.com/course/the-complete-web-development-bootcamp/",
                None,
            ),
        ];

        Self::from_links(seed.into_iter().map(|(n, title, url, display)| AffiliateLink {
            id: Uuid::from_u128(n),
            title: title.to_string(),
            affiliate_url: url.to_string(),
            display_text: display.map(str::to_string),
            created_at: DateTime::<Utc>::default(),
        }))
    }

    pub fn lookup(&self, title: &str) -> Option<&AffiliateLink> {
        self.by_title.get(&normalize_title(title))
    }

    pub fn link_titles<'a>(&self, titles: impl IntoIterator<Item = &'a str>) -> Vec<LinkedCourse> {
        titles
            .into_iter()
            .map(|title| {
                let link = self.lookup(title).cloned();
                LinkedCourse {
                    title: title.to_string(),
                    label: link.as_ref().map_or(title, |l| l.label()).to_string(),
                    link,
                }
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.by_title.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_title.is_empty()
    }
}

/// Reads the directory through the store's public read path, falling back to
/// the built-in links if the read fails.
pub async fn load_directory(store: &dyn AdminStore) -> AffiliateDirectory {
    match store.list_links().await {
        Ok(links) => AffiliateDirectory::from_links(links),
        Err(e) => {
            warn!(error = %e, "affiliate directory unavailable; using built-in links");
            AffiliateDirectory::builtin()
        }
    }
}

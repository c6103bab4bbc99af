use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The single persisted aggregate: every piece of editable site content.
///
/// All fields tolerate absence on deserialize so documents written by older
/// deployments keep loading. Unknown top-level keys are preserved through
/// `extra` and survive a load/replace round trip untouched.
///
/// The session flag (`isAuthenticated`) is deliberately not modeled here.
/// It is local to an admin session and must never reach storage; the
/// migrator strips it from raw input (see [`crate::document::migrate`]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteDocument {
    pub config: SiteConfig,
    pub courses: Vec<Course>,
    pub teachers: Vec<Teacher>,
    pub achievements: Vec<Achievement>,
    pub testimonials: Vec<Testimonial>,
    pub blog_posts: Vec<BlogPost>,
    pub messages: Vec<GuestMessage>,
    pub categories: Vec<String>,
    pub public_documents: Vec<PublicDocument>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Site-wide editable settings: branding, contact info, legal text, SEO
/// fields, map embed, social links, and display stats.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SiteConfig {
    pub hero_video_url: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    pub about_text: String,
    pub mission: String,
    pub vision: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub about_title: Option<String>,
    pub address: String,
    pub phone: String,
    pub zalo: String,
    pub email: String,
    pub google_maps_embed: String,
    pub seo_title: String,
    pub seo_description: String,
    pub seo_keywords: String,
    pub establishment_decision: String,
    pub business_license: String,
    pub representative: String,
    pub founding_date: String,
    pub brand_name_principal: String,
    pub brand_name_sub: String,
    pub brand_short_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand_logo_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facebook: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub youtube: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messenger: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats_years: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats_teachers: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats_courses: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats_satisfaction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub privacy_policy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terms_of_service: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Course {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Public URL of the course image, managed or external.
    pub image: String,
    pub price: String,
    pub duration: String,
    pub category: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Teacher {
    pub id: String,
    pub name: String,
    pub role: String,
    pub bio: String,
    pub image: String,
    pub phone: String,
    pub email: String,
    pub gender: Gender,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zalo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_phone: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_email: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Achievement {
    pub id: String,
    pub year: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Testimonial {
    pub id: String,
    pub name: String,
    pub role: String,
    pub content: String,
    pub rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub content: String,
    pub image: String,
    pub date: String,
    pub category: String,
}

/// Inbound contact-form submission. The list is append-only; `replied` is
/// flipped by the admin when a reply goes out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuestMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub timestamp: String,
    pub replied: bool,
}

/// Descriptor of an uploaded PDF exposed on the public site.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PublicDocument {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub upload_date: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
}

/// Display ordering shared by records carrying an optional `order` field.
/// Missing order sorts as zero.
pub trait DisplayOrdered {
    fn display_order(&self) -> i64;
}

macro_rules! impl_display_ordered {
    ($($ty:ty),+) => {
        $(impl DisplayOrdered for $ty {
            fn display_order(&self) -> i64 {
                self.order.unwrap_or(0)
            }
        })+
    };
}

impl_display_ordered!(Teacher, Achievement, Testimonial, PublicDocument);

/// Sort records ascending by their display order. The sort is stable, so
/// records without an explicit order keep their stored sequence.
pub fn sort_for_display<T: DisplayOrdered>(items: &mut [T]) {
    items.sort_by_key(|item| item.display_order());
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_names_are_camel_case() {
        let mut doc = SiteDocument::default();
        doc.blog_posts.push(BlogPost {
            id: "1".to_string(),
            ..Default::default()
        });
        doc.public_documents.push(PublicDocument {
            id: "2".to_string(),
            doc_type: "pdf".to_string(),
            ..Default::default()
        });

        let value = serde_json::to_value(&doc).unwrap();
        assert!(value.get("blogPosts").is_some());
        assert!(value.get("publicDocuments").is_some());
        assert_eq!(value["publicDocuments"][0]["type"], json!("pdf"));
        assert_eq!(value["publicDocuments"][0]["uploadDate"], json!(""));
    }

    #[test]
    fn unknown_top_level_keys_round_trip() {
        let raw = json!({
            "courses": [],
            "announcementBanner": {"text": "enrolment open"}
        });
        let doc: SiteDocument = serde_json::from_value(raw).unwrap();
        assert!(doc.extra.contains_key("announcementBanner"));

        let back = serde_json::to_value(&doc).unwrap();
        assert_eq!(back["announcementBanner"]["text"], json!("enrolment open"));
    }

    #[test]
    fn missing_order_sorts_first_and_stable() {
        let mut teachers = vec![
            Teacher {
                id: "a".to_string(),
                order: Some(5),
                ..Default::default()
            },
            Teacher {
                id: "b".to_string(),
                order: None,
                ..Default::default()
            },
            Teacher {
                id: "c".to_string(),
                order: None,
                ..Default::default()
            },
            Teacher {
                id: "d".to_string(),
                order: Some(-1),
                ..Default::default()
            },
        ];
        sort_for_display(&mut teachers);
        let ids: Vec<&str> = teachers.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["d", "b", "c", "a"]);
    }

    #[test]
    fn gender_serializes_lowercase() {
        let teacher = Teacher {
            gender: Gender::Female,
            ..Default::default()
        };
        let value = serde_json::to_value(&teacher).unwrap();
        assert_eq!(value["gender"], json!("female"));
    }
}

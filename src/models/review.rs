//! Review models

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Review joined with its author's profile, for the room detail page
#[derive(Debug, Clone, FromRow)]
pub struct ReviewWithAuthor {
    pub id: Uuid,
    pub rating: i32,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub author_name: String,
}

impl ReviewWithAuthor {
    /// Star string for display, e.g. "★★★★☆"
    pub fn stars(&self) -> String {
        let filled = self.rating.clamp(0, 5) as usize;
        let mut out = String::with_capacity(5 * '★'.len_utf8());
        for _ in 0..filled {
            out.push('★');
        }
        for _ in filled..5 {
            out.push('☆');
        }
        out
    }
}

/// Mean rating across reviews, `None` when there are none
pub fn average_rating(reviews: &[ReviewWithAuthor]) -> Option<f64> {
    if reviews.is_empty() {
        return None;
    }
    let sum: i32 = reviews.iter().map(|r| r.rating).sum();
    Some(f64::from(sum) / reviews.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: i32) -> ReviewWithAuthor {
        ReviewWithAuthor {
            id: Uuid::new_v4(),
            rating,
            comment: "Lovely stay".to_string(),
            created_at: Utc::now(),
            author_name: "Ana".to_string(),
        }
    }

    #[test]
    fn test_stars_rendering() {
        assert_eq!(review(0).stars(), "☆☆☆☆☆");
        assert_eq!(review(3).stars(), "★★★☆☆");
        assert_eq!(review(5).stars(), "★★★★★");
    }

    #[test]
    fn test_stars_clamps_out_of_range() {
        assert_eq!(review(9).stars(), "★★★★★");
        assert_eq!(review(-1).stars(), "☆☆☆☆☆");
    }

    #[test]
    fn test_average_rating() {
        assert_eq!(average_rating(&[]), None);
        let reviews = vec![review(4), review(5), review(3)];
        assert_eq!(average_rating(&reviews), Some(4.0));
    }
}

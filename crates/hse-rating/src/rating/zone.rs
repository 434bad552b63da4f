use serde::{Deserialize, Serialize};

/// Traffic-light bucket used when presenting a rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingZone {
    Green,
    Yellow,
    Red,
}

impl RatingZone {
    pub fn from_rating(rating: f64) -> Self {
        if rating >= 80.0 {
            RatingZone::Green
        } else if rating >= 50.0 {
            RatingZone::Yellow
        } else {
            RatingZone::Red
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RatingZone::Green => "green",
            RatingZone::Yellow => "yellow",
            RatingZone::Red => "red",
        }
    }
}

//! Mapping a recommendation onto the results region

use crate::catalog::CropImageCatalog;
use crate::models::Recommendation;

/// One card in the "best crops" list
#[derive(Debug, Clone, PartialEq)]
pub struct CropCard {
    pub name: String,
    pub water_need: String,
    pub reason: String,
    pub image: String,
}

/// Display surface for results
pub trait ResultsSink {
    type Error;

    /// Remove previously rendered cards and list items
    fn clear(&mut self) -> Result<(), Self::Error>;
    fn reveal(&mut self) -> Result<(), Self::Error>;
    fn set_explanation(&mut self, text: &str) -> Result<(), Self::Error>;
    fn push_card(&mut self, card: &CropCard) -> Result<(), Self::Error>;
    fn push_budget_item(&mut self, text: &str) -> Result<(), Self::Error>;
    fn push_avoid_item(&mut self, text: &str) -> Result<(), Self::Error>;

    fn scroll_into_view(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Build the cards for a recommendation, in the order received
pub fn crop_cards(rec: &Recommendation, catalog: &CropImageCatalog) -> Vec<CropCard> {
    rec.best_crops
        .iter()
        .map(|crop| CropCard {
            name: crop.name.clone(),
            water_need: crop.water_need.clone(),
            reason: crop.reason.clone(),
            image: catalog.image_for(&crop.name).to_string(),
        })
        .collect()
}

/// Render `rec` into `sink`, replacing anything rendered before
pub fn render_recommendation<S: ResultsSink>(
    sink: &mut S,
    rec: &Recommendation,
    catalog: &CropImageCatalog,
) -> Result<(), S::Error> {
    sink.clear()?;
    sink.reveal()?;
    sink.set_explanation(&rec.explanation)?;

    for card in crop_cards(rec, catalog) {
        sink.push_card(&card)?;
    }
    for item in &rec.budget_friendly {
        sink.push_budget_item(item)?;
    }
    for item in &rec.not_recommended {
        sink.push_avoid_item(item)?;
    }

    sink.scroll_into_view()
}

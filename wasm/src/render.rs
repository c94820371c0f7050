//! DOM rendering of recommendation results

use shared::{CropCard, ResultsSink};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlImageElement, ScrollIntoViewOptions};

use crate::dom;

/// The results region of the page
pub struct DomResults {
    document: Document,
    root: Element,
    explanation: Element,
    best: Element,
    budget: Element,
    avoid: Element,
}

impl DomResults {
    pub fn from_document(document: &Document) -> Result<Self, JsValue> {
        Ok(Self {
            document: document.clone(),
            root: dom::query(document, "#results")?,
            explanation: dom::query(document, "#explanation")?,
            best: dom::query(document, "#best-crops")?,
            budget: dom::query(document, "#budget-crops")?,
            avoid: dom::query(document, "#avoid-crops")?,
        })
    }

    fn element(&self, tag: &str, class: &str, text: Option<&str>) -> Result<Element, JsValue> {
        let el = self.document.create_element(tag)?;
        if !class.is_empty() {
            el.set_class_name(class);
        }
        if text.is_some() {
            el.set_text_content(text);
        }
        Ok(el)
    }

    fn push_list_item(&self, list: &Element, text: &str) -> Result<(), JsValue> {
        let li = self.element("li", "", Some(text))?;
        list.append_child(&li)?;
        Ok(())
    }
}

impl ResultsSink for DomResults {
    type Error = JsValue;

    fn clear(&mut self) -> Result<(), JsValue> {
        for list in [&self.best, &self.budget, &self.avoid] {
            list.set_inner_html("");
        }
        self.explanation.set_text_content(None);
        Ok(())
    }

    fn reveal(&mut self) -> Result<(), JsValue> {
        self.root.remove_attribute("hidden")?;
        self.root.class_list().remove_1("hidden")
    }

    fn set_explanation(&mut self, text: &str) -> Result<(), JsValue> {
        self.explanation.set_text_content(Some(text));
        Ok(())
    }

    fn push_card(&mut self, card: &CropCard) -> Result<(), JsValue> {
        let container = self.element("div", "crop-card", None)?;

        let image: HtmlImageElement = self.element("img", "crop-image", None)?.dyn_into()?;
        image.set_src(&card.image);
        image.set_alt(&card.name);
        container.append_child(&image)?;

        let name = self.element("h3", "crop-name", Some(&card.name))?;
        container.append_child(&name)?;

        let water_need = format!("💧 Water need: {}", card.water_need);
        let water = self.element("p", "crop-water", Some(&water_need))?;
        container.append_child(&water)?;

        let reason = self.element("p", "crop-reason", Some(&card.reason))?;
        container.append_child(&reason)?;

        self.best.append_child(&container)?;
        Ok(())
    }

    fn push_budget_item(&mut self, text: &str) -> Result<(), JsValue> {
        self.push_list_item(&self.budget, text)
    }

    fn push_avoid_item(&mut self, text: &str) -> Result<(), JsValue> {
        self.push_list_item(&self.avoid, text)
    }

    fn scroll_into_view(&mut self) -> Result<(), JsValue> {
        let options: ScrollIntoViewOptions =
            dom::js_object(&[("behavior", "smooth".into()), ("block", "start".into())])?
                .unchecked_into();
        self.root.scroll_into_view_with_scroll_into_view_options(&options);
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_tests {
    use super::*;
    use shared::{render_recommendation, BestCrop, CropImageCatalog, Recommendation};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn mount_results_region(document: &Document) {
        let body = dom::body(document).unwrap();
        body.set_inner_html(
            r#"<section id="results" class="hidden" hidden>
                <p id="explanation"></p>
                <div id="best-crops"></div>
                <ul id="budget-crops"></ul>
                <ul id="avoid-crops"></ul>
            </section>"#,
        );
    }

    fn recommendation(crops: &[&str], budget: &[&str]) -> Recommendation {
        Recommendation {
            best_crops: crops
                .iter()
                .map(|name| BestCrop {
                    name: name.to_string(),
                    water_need: "Low".into(),
                    reason: "Tolerates dry spells".into(),
                })
                .collect(),
            budget_friendly: budget.iter().map(|s| s.to_string()).collect(),
            not_recommended: vec!["Rice".into()],
            explanation: "Low rainfall expected".into(),
        }
    }

    #[wasm_bindgen_test]
    fn test_render_fills_region() {
        let document = dom::document().unwrap();
        mount_results_region(&document);
        let mut results = DomResults::from_document(&document).unwrap();
        let catalog = CropImageCatalog::default();

        render_recommendation(&mut results, &recommendation(&["Chickpea (gram)"], &["Millet"]), &catalog)
            .unwrap();

        let root = dom::query(&document, "#results").unwrap();
        assert!(!root.has_attribute("hidden"));
        assert_eq!(document.query_selector_all(".crop-card").unwrap().length(), 1);
        let image = dom::query(&document, ".crop-image").unwrap();
        assert_eq!(
            image.get_attribute("src").as_deref(),
            Some("images/crops/chickpea.jpg")
        );
        assert_eq!(
            dom::query(&document, "#explanation").unwrap().text_content().as_deref(),
            Some("Low rainfall expected")
        );
    }

    #[wasm_bindgen_test]
    fn test_second_render_replaces_lists() {
        let document = dom::document().unwrap();
        mount_results_region(&document);
        let mut results = DomResults::from_document(&document).unwrap();
        let catalog = CropImageCatalog::default();

        render_recommendation(
            &mut results,
            &recommendation(&["Millet", "Sorghum"], &["Millet", "Moong"]),
            &catalog,
        )
        .unwrap();
        render_recommendation(&mut results, &recommendation(&["Wheat"], &["Barley"]), &catalog)
            .unwrap();

        assert_eq!(document.query_selector_all(".crop-card").unwrap().length(), 1);
        assert_eq!(document.query_selector_all("#budget-crops li").unwrap().length(), 1);
        assert_eq!(document.query_selector_all("#avoid-crops li").unwrap().length(), 1);
        assert_eq!(
            dom::query(&document, ".crop-name").unwrap().text_content().as_deref(),
            Some("Wheat")
        );
    }
}

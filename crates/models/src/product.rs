use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// One color variant of a product and the stock behind it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductColor {
    pub color: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub quantity: u64,
}

/// Catalog product as stored in the `Products` collection. Field names are
/// camelCase in both JSON responses and stored documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub title: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<f64>,
    #[serde(default)]
    pub rating_count: u64,
    #[serde(default)]
    pub avg_rate: f64,
    #[serde(rename = "mainImgSRC")]
    pub main_img_src: String,
    pub description: String,
    pub category: String,
    pub sub_category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_flash: Option<bool>,
    pub colors: Vec<ProductColor>,
}

impl Product {
    /// Document validation, applied on every write path.
    pub fn validate(&self) -> Result<(), ModelError> {
        if self.title.trim().chars().count() < 7 {
            return Err(invalid("title must be at least 7 characters"));
        }
        if !(self.price > 0.0) {
            return Err(invalid("price must be a positive number"));
        }
        if let Some(discount) = self.discount_price {
            if !(discount < self.price) {
                return Err(invalid("discountPrice must be strictly less than price"));
            }
        }
        if !(0.0..=5.0).contains(&self.avg_rate) {
            return Err(invalid("avgRate must be between 0 and 5"));
        }
        validate_url(&self.main_img_src)?;
        if self.description.trim().chars().count() < 10 {
            return Err(invalid("description must be at least 10 characters"));
        }
        if self.category.trim().is_empty() {
            return Err(invalid("category is required"));
        }
        if self.sub_category.trim().is_empty() {
            return Err(invalid("subCategory is required"));
        }
        if self.colors.is_empty() {
            return Err(invalid("at least one color variant is required"));
        }
        for variant in &self.colors {
            if variant.color.trim().is_empty() {
                return Err(invalid("color name is required"));
            }
            for image in &variant.images {
                validate_url(image)?;
            }
        }
        Ok(())
    }
}

/// Creation payload: a product without its id, which the service assigns.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub discount_price: Option<f64>,
    #[serde(default)]
    pub rating_count: u64,
    #[serde(default)]
    pub avg_rate: f64,
    #[serde(rename = "mainImgSRC")]
    pub main_img_src: String,
    pub description: String,
    pub category: String,
    pub sub_category: String,
    #[serde(default)]
    pub is_featured: Option<bool>,
    #[serde(default)]
    pub is_flash: Option<bool>,
    pub colors: Vec<ProductColor>,
}

impl NewProduct {
    pub fn into_product(self, id: i64) -> Product {
        Product {
            id,
            title: self.title,
            price: self.price,
            discount_price: self.discount_price,
            rating_count: self.rating_count,
            avg_rate: self.avg_rate,
            main_img_src: self.main_img_src,
            description: self.description,
            category: self.category,
            sub_category: self.sub_category,
            is_featured: self.is_featured,
            is_flash: self.is_flash,
            colors: self.colors,
        }
    }
}

/// Typed partial update. Only known fields exist, so unrecognized JSON keys
/// are dropped rather than stored; applied as a shallow field overwrite.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avg_rate: Option<f64>,
    #[serde(default, rename = "mainImgSRC", skip_serializing_if = "Option::is_none")]
    pub main_img_src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_flash: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<ProductColor>>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.price.is_none()
            && self.discount_price.is_none()
            && self.rating_count.is_none()
            && self.avg_rate.is_none()
            && self.main_img_src.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.sub_category.is_none()
            && self.is_featured.is_none()
            && self.is_flash.is_none()
            && self.colors.is_none()
    }

    /// Shallow merge onto an existing product. `colors` is replaced wholesale,
    /// not deep-merged.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(title) = &self.title {
            product.title = title.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(discount) = self.discount_price {
            product.discount_price = Some(discount);
        }
        if let Some(rating_count) = self.rating_count {
            product.rating_count = rating_count;
        }
        if let Some(avg_rate) = self.avg_rate {
            product.avg_rate = avg_rate;
        }
        if let Some(src) = &self.main_img_src {
            product.main_img_src = src.clone();
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
        if let Some(category) = &self.category {
            product.category = category.clone();
        }
        if let Some(sub_category) = &self.sub_category {
            product.sub_category = sub_category.clone();
        }
        if let Some(is_featured) = self.is_featured {
            product.is_featured = Some(is_featured);
        }
        if let Some(is_flash) = self.is_flash {
            product.is_flash = Some(is_flash);
        }
        if let Some(colors) = &self.colors {
            product.colors = colors.clone();
        }
    }
}

pub fn validate_url(value: &str) -> Result<(), ModelError> {
    let rest = value
        .strip_prefix("http://")
        .or_else(|| value.strip_prefix("https://"))
        .ok_or_else(|| invalid(&format!("invalid URL: {value}")))?;
    let host = rest.split('/').next().unwrap_or_default();
    if host.is_empty() {
        return Err(invalid(&format!("invalid URL: {value}")));
    }
    Ok(())
}

fn invalid(message: &str) -> ModelError {
    ModelError::Validation(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Product {
        Product {
            id: 1,
            title: "Wireless Mouse".into(),
            price: 49.9,
            discount_price: Some(39.9),
            rating_count: 12,
            avg_rate: 4.5,
            main_img_src: "https://cdn.example.com/mouse.png".into(),
            description: "A comfortable wireless mouse.".into(),
            category: "electronics".into(),
            sub_category: "accessories".into(),
            is_featured: Some(true),
            is_flash: None,
            colors: vec![ProductColor {
                color: "black".into(),
                images: vec!["https://cdn.example.com/mouse-black.png".into()],
                quantity: 10,
            }],
        }
    }

    #[test]
    fn valid_product_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn short_title_rejected() {
        let mut p = sample();
        p.title = "Mouse".into();
        assert!(p.validate().is_err());
    }

    #[test]
    fn discount_must_be_below_price() {
        let mut p = sample();
        p.discount_price = Some(p.price);
        assert!(p.validate().is_err());
    }

    #[test]
    fn negative_price_rejected() {
        let mut p = sample();
        p.price = -1.0;
        assert!(p.validate().is_err());
    }

    #[test]
    fn avg_rate_out_of_range_rejected() {
        let mut p = sample();
        p.avg_rate = 5.5;
        assert!(p.validate().is_err());
    }

    #[test]
    fn bad_image_url_rejected() {
        let mut p = sample();
        p.main_img_src = "ftp://cdn.example.com/mouse.png".into();
        assert!(p.validate().is_err());
    }

    #[test]
    fn empty_colors_rejected() {
        let mut p = sample();
        p.colors.clear();
        assert!(p.validate().is_err());
    }

    #[test]
    fn patch_apply_is_shallow() {
        let mut p = sample();
        let patch = ProductPatch { price: Some(59.9), ..ProductPatch::default() };
        patch.apply_to(&mut p);
        assert_eq!(p.price, 59.9);
        assert_eq!(p.title, "Wireless Mouse");
    }

    #[test]
    fn patch_emptiness() {
        assert!(ProductPatch::default().is_empty());
        let patch = ProductPatch { title: Some("x".into()), ..ProductPatch::default() };
        assert!(!patch.is_empty());
    }

    #[test]
    fn patch_drops_unknown_keys() {
        let patch: ProductPatch =
            serde_json::from_str(r#"{"price": 5.0, "warehouse": "east"}"#).unwrap();
        assert_eq!(patch.price, Some(5.0));
        let round_trip = serde_json::to_value(&patch).unwrap();
        assert!(round_trip.get("warehouse").is_none());
    }

    #[test]
    fn serializes_camel_case() {
        let value = serde_json::to_value(sample()).unwrap();
        assert!(value.get("discountPrice").is_some());
        assert!(value.get("mainImgSRC").is_some());
        assert!(value.get("subCategory").is_some());
    }
}

use crate::foundation::core::{Paint, Style};
use crate::foundation::error::{CubistError, CubistResult};
use crate::style::color::parse_paint;

/// Global fallback values for properties left unset by the whole ancestor
/// chain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleDefaults {
    /// Interior paint.
    pub fill: Paint,
    /// Interior opacity.
    pub fill_opacity: f64,
    /// Outline paint.
    pub stroke: Paint,
    /// Outline width in local units.
    pub stroke_width: f64,
    /// Outline opacity.
    pub stroke_opacity: f64,
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self {
            fill: Paint::None,
            fill_opacity: 1.0,
            stroke: Paint::None,
            stroke_width: 4.0,
            stroke_opacity: 1.0,
        }
    }
}

/// The style-relevant attributes of one element, each possibly unset.
///
/// Unset properties fall through to the inherited value during [`or`] and
/// to [`StyleDefaults`] during [`resolve`].
///
/// [`or`]: StyleAttrs::or
/// [`resolve`]: StyleAttrs::resolve
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StyleAttrs {
    /// `fill` / `fill="..."`.
    pub fill: Option<Paint>,
    /// `fill-opacity`.
    pub fill_opacity: Option<f64>,
    /// `stroke`.
    pub stroke: Option<Paint>,
    /// `stroke-width`.
    pub stroke_width: Option<f64>,
    /// `stroke-opacity`.
    pub stroke_opacity: Option<f64>,
}

impl StyleAttrs {
    /// Reads an element's style attributes: presentation attributes first,
    /// then the inline `style` declarations, which win over them.
    pub fn from_element(node: roxmltree::Node<'_, '_>) -> CubistResult<Self> {
        let mut attrs = Self::default();
        for attr in node.attributes() {
            attrs.apply_property(attr.name(), attr.value())?;
        }
        if let Some(decls) = node.attribute("style") {
            attrs.apply_style_decls(decls)?;
        }
        Ok(attrs)
    }

    /// Sets one property by its SVG presentation-attribute name. Names with
    /// no styling role here are ignored.
    pub fn apply_property(&mut self, name: &str, value: &str) -> CubistResult<()> {
        match name {
            "fill" => self.fill = Some(parse_paint(value)?),
            "fill-opacity" => self.fill_opacity = Some(parse_opacity(value)?),
            "stroke" => self.stroke = Some(parse_paint(value)?),
            "stroke-width" => self.stroke_width = Some(parse_stroke_width(value)?),
            "stroke-opacity" => self.stroke_opacity = Some(parse_opacity(value)?),
            _ => {}
        }
        Ok(())
    }

    /// Applies an inline `style="name: value; ..."` block. Later
    /// declarations win over earlier ones.
    pub fn apply_style_decls(&mut self, decls: &str) -> CubistResult<()> {
        for decl in decls.split(';') {
            let decl = decl.trim();
            if decl.is_empty() {
                continue;
            }
            let Some((name, value)) = decl.split_once(':') else {
                return Err(CubistError::style(format!(
                    "malformed style declaration \"{decl}\""
                )));
            };
            self.apply_property(name.trim(), value.trim())?;
        }
        Ok(())
    }

    /// Cascade step: properties set on `self` win, unset ones fall through
    /// to `inherited`.
    pub fn or(self, inherited: Self) -> Self {
        Self {
            fill: self.fill.or(inherited.fill),
            fill_opacity: self.fill_opacity.or(inherited.fill_opacity),
            stroke: self.stroke.or(inherited.stroke),
            stroke_width: self.stroke_width.or(inherited.stroke_width),
            stroke_opacity: self.stroke_opacity.or(inherited.stroke_opacity),
        }
    }

    /// Resolves every property to a concrete value for attaching to emitted
    /// geometry.
    pub fn resolve(&self, defaults: &StyleDefaults) -> Style {
        Style {
            fill: self.fill.unwrap_or(defaults.fill),
            fill_opacity: self.fill_opacity.unwrap_or(defaults.fill_opacity),
            stroke: self.stroke.unwrap_or(defaults.stroke),
            stroke_width: self.stroke_width.unwrap_or(defaults.stroke_width),
            stroke_opacity: self.stroke_opacity.unwrap_or(defaults.stroke_opacity),
        }
    }
}

fn parse_opacity(value: &str) -> CubistResult<f64> {
    let n: f64 = value
        .trim()
        .parse()
        .map_err(|_| CubistError::style(format!("invalid opacity \"{value}\"")))?;
    Ok(n.clamp(0.0, 1.0))
}

fn parse_stroke_width(value: &str) -> CubistResult<f64> {
    let value = value.trim();
    // "" and "none" are zero-width, matching the rect attribute rule.
    if value.is_empty() || value.eq_ignore_ascii_case("none") {
        return Ok(0.0);
    }
    value
        .parse()
        .map_err(|_| CubistError::style(format!("invalid stroke-width \"{value}\"")))
}

#[cfg(test)]
#[path = "../../tests/unit/style/cascade.rs"]
mod tests;

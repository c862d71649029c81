use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{Color, ForcedDomain};
use crate::error::{AxesError, AxesResult};

/// Solid fill as the host serializes it: `{"solid": {"color": "#rrggbb"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillValue {
    pub solid: SolidFill,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolidFill {
    pub color: String,
}

/// One value in the host's per-object property bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Fill(FillValue),
}

/// Properties of one host object (`categoryAxis`, `valueAxis`), in authoring order.
pub type DataViewObject = IndexMap<String, PropertyValue>;

/// The host configuration bag keyed by object name.
pub type DataViewObjects = IndexMap<String, DataViewObject>;

pub const CATEGORY_AXIS_OBJECT: &str = "categoryAxis";
pub const VALUE_AXIS_OBJECT: &str = "valueAxis";

/// Scale family requested for an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AxisScaleType {
    #[default]
    Linear,
    Log,
}

impl AxisScaleType {
    fn parse(text: &str) -> AxesResult<Self> {
        match text.to_ascii_lowercase().as_str() {
            "linear" => Ok(Self::Linear),
            "log" => Ok(Self::Log),
            other => Err(AxesError::InvalidData(format!(
                "unsupported axis scale type `{other}`"
            ))),
        }
    }
}

/// Side of the plot the primary value axis is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ValueAxisPosition {
    #[default]
    Left,
    Right,
}

impl ValueAxisPosition {
    fn parse(text: &str) -> AxesResult<Self> {
        match text.to_ascii_lowercase().as_str() {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            other => Err(AxesError::InvalidData(format!(
                "unsupported value axis position `{other}`"
            ))),
        }
    }
}

/// How the secondary value axis title combines with its display unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SecondaryTitleStyle {
    /// Title text only; the unit is never appended.
    #[default]
    ShowTitleOnly,
    /// The unit replaces the title.
    ShowUnitOnly,
    /// `"Title (unit)"`.
    ShowBoth,
}

impl SecondaryTitleStyle {
    fn parse(text: &str) -> AxesResult<Self> {
        match text {
            "showTitleOnly" => Ok(Self::ShowTitleOnly),
            "showUnitOnly" => Ok(Self::ShowUnitOnly),
            "showBoth" => Ok(Self::ShowBoth),
            other => Err(AxesError::InvalidData(format!(
                "unsupported secondary axis style `{other}`"
            ))),
        }
    }
}

/// User intent for a single axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    pub show: bool,
    pub scale_type: AxisScaleType,
    pub forced_domain: ForcedDomain,
    pub show_title: bool,
    pub label_color: Option<Color>,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            show: true,
            scale_type: AxisScaleType::Linear,
            forced_domain: ForcedDomain::default(),
            show_title: false,
            label_color: None,
        }
    }
}

/// Axis configuration resolved from the host objects for one update.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CartesianAxesConfig {
    pub category_axis: AxisConfig,
    pub value_axis: AxisConfig,
    pub secondary_value_axis: AxisConfig,
    /// `secShow` as authored: `Some(false)` forces a merge, `Some(true)`
    /// always keeps a separate secondary axis, `None` lets overlap decide.
    pub show_secondary_axis: Option<bool>,
    pub value_axis_position: ValueAxisPosition,
    pub secondary_title_style: SecondaryTitleStyle,
}

impl CartesianAxesConfig {
    /// Resolves the recognized `categoryAxis` / `valueAxis` properties.
    ///
    /// Missing objects or properties fall back to defaults; a property with
    /// the wrong type is rejected.
    pub fn from_objects(objects: &DataViewObjects) -> AxesResult<Self> {
        let category = PropertyReader::new(objects, CATEGORY_AXIS_OBJECT);
        let value = PropertyReader::new(objects, VALUE_AXIS_OBJECT);

        let category_axis = AxisConfig {
            show: category.bool("show")?.unwrap_or(true),
            scale_type: category
                .text("axisScale")?
                .map(AxisScaleType::parse)
                .transpose()?
                .unwrap_or_default(),
            forced_domain: ForcedDomain::new(category.number("start")?, category.number("end")?),
            show_title: category.bool("showAxisTitle")?.unwrap_or(false),
            label_color: category.color("labelColor")?,
        };

        let value_axis = AxisConfig {
            show: value.bool("show")?.unwrap_or(true),
            scale_type: value
                .text("axisScale")?
                .map(AxisScaleType::parse)
                .transpose()?
                .unwrap_or_default(),
            forced_domain: ForcedDomain::new(value.number("start")?, value.number("end")?),
            show_title: value.bool("showAxisTitle")?.unwrap_or(false),
            label_color: value.color("labelColor")?,
        };

        let show_secondary_axis = value.bool("secShow")?;
        let secondary_value_axis = AxisConfig {
            show: show_secondary_axis.unwrap_or(true),
            scale_type: value
                .text("secAxisScale")?
                .map(AxisScaleType::parse)
                .transpose()?
                .unwrap_or_default(),
            forced_domain: ForcedDomain::new(value.number("secStart")?, value.number("secEnd")?),
            show_title: value.bool("secShowAxisTitle")?.unwrap_or(false),
            label_color: value.color("secLabelColor")?,
        };

        Ok(Self {
            category_axis,
            value_axis,
            secondary_value_axis,
            show_secondary_axis,
            value_axis_position: value
                .text("position")?
                .map(ValueAxisPosition::parse)
                .transpose()?
                .unwrap_or_default(),
            secondary_title_style: value
                .text("secAxisStyle")?
                .map(SecondaryTitleStyle::parse)
                .transpose()?
                .unwrap_or_default(),
        })
    }

    /// Parses a JSON object bag and resolves it.
    pub fn from_json_str(input: &str) -> AxesResult<Self> {
        let objects: DataViewObjects = serde_json::from_str(input).map_err(|e| {
            AxesError::InvalidData(format!("failed to parse axis objects json: {e}"))
        })?;
        Self::from_objects(&objects)
    }

    /// Only an explicit `secShow = false` forces the value axes to merge.
    #[must_use]
    pub fn force_value_axis_merge(&self) -> bool {
        self.show_secondary_axis == Some(false)
    }

    /// An explicit `secShow = true` keeps the secondary axis without trying to merge.
    #[must_use]
    pub fn skip_value_axis_merge(&self) -> bool {
        self.show_secondary_axis == Some(true)
    }

    #[must_use]
    pub fn show_value_axis_on_right(&self) -> bool {
        self.value_axis_position == ValueAxisPosition::Right
    }
}

struct PropertyReader<'a> {
    object_name: &'static str,
    object: Option<&'a DataViewObject>,
}

impl<'a> PropertyReader<'a> {
    fn new(objects: &'a DataViewObjects, object_name: &'static str) -> Self {
        Self {
            object_name,
            object: objects.get(object_name),
        }
    }

    fn get(&self, property: &str) -> Option<&'a PropertyValue> {
        match self.object?.get(property)? {
            PropertyValue::Null => None,
            value => Some(value),
        }
    }

    fn mismatch(&self, property: &str, expected: &str) -> AxesError {
        AxesError::InvalidData(format!(
            "property `{}.{property}` must be a {expected}",
            self.object_name
        ))
    }

    fn bool(&self, property: &str) -> AxesResult<Option<bool>> {
        match self.get(property) {
            None => Ok(None),
            Some(PropertyValue::Bool(value)) => Ok(Some(*value)),
            Some(_) => Err(self.mismatch(property, "boolean")),
        }
    }

    fn number(&self, property: &str) -> AxesResult<Option<f64>> {
        match self.get(property) {
            None => Ok(None),
            Some(PropertyValue::Number(value)) if value.is_finite() => Ok(Some(*value)),
            Some(_) => Err(self.mismatch(property, "finite number")),
        }
    }

    fn text(&self, property: &str) -> AxesResult<Option<&'a str>> {
        match self.get(property) {
            None => Ok(None),
            Some(PropertyValue::Text(value)) => Ok(Some(value.as_str())),
            Some(_) => Err(self.mismatch(property, "string")),
        }
    }

    fn color(&self, property: &str) -> AxesResult<Option<Color>> {
        match self.get(property) {
            None => Ok(None),
            Some(PropertyValue::Text(hex)) => Color::from_hex(hex).map(Some),
            Some(PropertyValue::Fill(fill)) => Color::from_hex(&fill.solid.color).map(Some),
            Some(_) => Err(self.mismatch(property, "fill color")),
        }
    }
}

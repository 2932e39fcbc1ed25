use egui::ecolor::Hsva;
use egui::{Color32, Modifiers, Pos2};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::element::{Element, ElementType, Polygon, Style};
use crate::geometry;
use crate::surface::Surface;

/// How a new hit set combines with the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SelectionMode {
    /// No modifier: the hit set becomes the selection.
    #[default]
    Replace,
    /// Shift: union with the current selection.
    Extend,
    /// Control: remove the hit set from the current selection.
    Subtract,
}

impl SelectionMode {
    pub fn from_modifiers(modifiers: &Modifiers) -> Self {
        if modifiers.shift {
            SelectionMode::Extend
        } else if modifiers.ctrl {
            SelectionMode::Subtract
        } else {
            SelectionMode::Replace
        }
    }
}

/// One row of the selected-shapes list.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeDescriptor {
    pub id: usize,
    pub kind: &'static str,
    pub stroke: Color32,
    pub fill: Color32,
}

/// The set of selected shape ids.
///
/// Holds ids only; the [`Document`] owns the shapes. Index 0 is the primary
/// shape for single-target commands.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    ids: Vec<usize>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids(ids: impl IntoIterator<Item = usize>) -> Self {
        let mut selection = Self { ids: ids.into_iter().collect() };
        selection.dedupe();
        selection
    }

    pub fn ids(&self) -> &[usize] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: usize) -> bool {
        self.ids.contains(&id)
    }

    pub fn primary(&self) -> Option<usize> {
        self.ids.first().copied()
    }

    pub fn add(&mut self, id: usize) {
        if !self.contains(id) {
            self.ids.push(id);
        }
    }

    pub fn remove(&mut self, id: usize) {
        self.ids.retain(|i| *i != id);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Assignment: the selection becomes exactly `hits`.
    pub fn replace(&mut self, hits: &[usize]) {
        self.ids = hits.to_vec();
        self.dedupe();
    }

    /// Union with `hits`.
    pub fn extend(&mut self, hits: &[usize]) {
        for id in hits {
            self.add(*id);
        }
    }

    /// Set difference with `hits`.
    pub fn subtract(&mut self, hits: &[usize]) {
        self.ids.retain(|id| !hits.contains(id));
    }

    pub fn apply(&mut self, mode: SelectionMode, hits: &[usize]) {
        match mode {
            SelectionMode::Replace => self.replace(hits),
            SelectionMode::Extend => self.extend(hits),
            SelectionMode::Subtract => self.subtract(hits),
        }
    }

    /// Collapse repeated ids, keeping first occurrences in order.
    pub fn dedupe(&mut self) {
        let mut seen = Vec::with_capacity(self.ids.len());
        self.ids.retain(|id| {
            if seen.contains(id) {
                false
            } else {
                seen.push(*id);
                true
            }
        });
    }

    /// Drop ids whose shapes are no longer in the document.
    pub fn prune(&mut self, document: &Document) {
        self.ids.retain(|id| document.contains_id(*id));
    }

    /// The selected shapes, in selection order.
    pub fn shapes<'a>(&self, document: &'a Document) -> Vec<&'a ElementType> {
        self.ids.iter().filter_map(|id| document.find_element_by_id(*id)).collect()
    }

    pub fn describe(&self, document: &Document) -> Vec<ShapeDescriptor> {
        self.shapes(document)
            .into_iter()
            .map(|shape| {
                let style = shape.style();
                ShapeDescriptor {
                    id: shape.id(),
                    kind: shape.element_type(),
                    stroke: style.stroke,
                    fill: style.fill,
                }
            })
            .collect()
    }

    /// Draw every selected shape in its complementary ghost colors.
    ///
    /// Renders restyled copies, so stored styles are never touched.
    pub fn ghost(&self, surface: &mut dyn Surface, document: &Document, alpha: f32) {
        for shape in self.shapes(document) {
            shape.with_style(ghost_style(shape.style(), alpha)).render(surface);
        }
    }

    /// Convex hull around every selected outline, as a polygon centered on
    /// its own centroid. Used as the shared pivot for group transforms.
    pub fn group_pivot(&self, document: &Document) -> Option<Polygon> {
        let outline: Vec<Pos2> = self.shapes(document).iter().flat_map(|s| s.polygon()).collect();
        let hull = geometry::convex_hull(&outline);
        match Polygon::from_points(0, &hull, Style::default()) {
            Ok(pivot) => Some(pivot),
            Err(err) => {
                warn!("No group pivot for {} shapes: {err}", self.len());
                None
            }
        }
    }
}

/// Hue-rotated (+180°) copy of `color` with a fixed alpha.
pub fn complementary(color: Color32, alpha: f32) -> Color32 {
    let mut hsva = Hsva::from(color);
    hsva.h = (hsva.h + 0.5).fract();
    hsva.a = alpha;
    Color32::from(hsva)
}

pub fn ghost_style(style: Style, alpha: f32) -> Style {
    Style::new(complementary(style.stroke, alpha), complementary(style.fill, alpha))
}

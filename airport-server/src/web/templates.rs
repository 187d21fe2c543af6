//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::Plane;

/// Arrivals board page.
#[derive(Template)]
#[template(path = "board.html")]
pub struct BoardTemplate {
    pub planes: Vec<PlaneView>,
}

/// Plane view model for templates.
#[derive(Debug, Clone)]
pub struct PlaneView {
    pub flight: String,
    pub time: String,
}

impl PlaneView {
    pub fn from_plane(plane: &Plane) -> Self {
        Self {
            flight: plane.flight.to_string(),
            time: plane.time.to_string(),
        }
    }
}

use super::{FetchState, PageContext};
use crate::errors::AppError;
use crate::models::roadmap::find_roadmap;
use crate::models::Roadmap;

/// Shows one roadmap. The backend only lists roadmaps, so the page fetches
/// the listing and picks the one named by the route.
#[derive(Debug)]
pub struct RoadmapPage {
    roadmap_id: String,
    roadmap: FetchState<Roadmap>,
}

impl RoadmapPage {
    pub fn new(roadmap_id: impl Into<String>) -> Self {
        Self {
            roadmap_id: roadmap_id.into(),
            roadmap: FetchState::Idle,
        }
    }

    pub async fn mount(&mut self, ctx: &mut PageContext<'_>) -> Result<(), AppError> {
        self.roadmap.begin_load()?;
        match ctx.api().roadmaps(ctx.token()).await {
            Ok(all) => match find_roadmap(all, &self.roadmap_id) {
                Some(roadmap) => self.roadmap.settle(roadmap),
                None => {
                    self.roadmap.fail();
                    ctx.toasts().error("Roadmap not found");
                }
            },
            Err(e) => {
                self.roadmap.fail();
                ctx.report(&e, "Failed to load roadmap");
            }
        }
        Ok(())
    }

    pub fn roadmap(&self) -> Option<&Roadmap> {
        self.roadmap.data()
    }
}

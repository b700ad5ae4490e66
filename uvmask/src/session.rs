//! Mesh session: a parsed mesh with its islands at one texture size
//!
//! [`UvSession`] is the context object tying the stages together. It owns
//! the mesh and its segmentation and answers face-level questions (which
//! island, what mask) without holding references back into its results.

use tracing::{debug, info};
use uvmask_core::{Color, RasterBuffer};
use uvmask_mesh::{
    Island, Mesh, OutlineOptions, OutlineRaster, ParseOptions, ParseReport, SegmentOptions,
    Segmentation, parse_obj, rasterize_faces, rasterize_outline, segment_islands, uv_to_pixel,
};
use uvmask_morph::{SimplifiedSheet, SimplifyOptions, simplify_sheet};
use uvmask_region::{LabelMap, label_components};

use crate::error::UvResult;

/// Merged regions of a simplified UV sheet
#[derive(Debug, Clone)]
pub struct SimplifiedRegions {
    /// Closed mask and its outline
    pub sheet: SimplifiedSheet,
    /// Components of the closed mask
    pub labels: LabelMap,
}

/// Faces grouped by a simplified region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplifiedIsland {
    /// Region label, or `None` when the face's centroid lies outside every
    /// region and its UV island was used instead
    pub region: Option<u32>,
    /// Face indices in ascending order
    pub faces: Vec<usize>,
}

/// A mesh, its UV islands and the texture size masks are drawn at
#[derive(Debug, Clone)]
pub struct UvSession {
    mesh: Mesh,
    segmentation: Segmentation,
    width: u32,
    height: u32,
    report: Option<ParseReport>,
}

impl UvSession {
    /// Segment `mesh` for a `width x height` texture.
    pub fn new(mesh: Mesh, width: u32, height: u32, options: &SegmentOptions) -> UvResult<Self> {
        if width == 0 || height == 0 {
            return Err(uvmask_core::Error::InvalidDimension { width, height }.into());
        }
        let segmentation = segment_islands(&mesh, options);
        info!(
            faces = mesh.face_count(),
            islands = segmentation.islands.len(),
            width,
            height,
            "opened UV session"
        );
        Ok(Self {
            mesh,
            segmentation,
            width,
            height,
            report: None,
        })
    }

    /// Parse OBJ text and segment it.
    pub fn from_obj(
        text: &str,
        parse: &ParseOptions,
        segment: &SegmentOptions,
        width: u32,
        height: u32,
    ) -> UvResult<Self> {
        let parsed = parse_obj(text, parse)?;
        let mut session = Self::new(parsed.mesh, width, height, segment)?;
        session.report = Some(parsed.report);
        Ok(session)
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn segmentation(&self) -> &Segmentation {
        &self.segmentation
    }

    pub fn islands(&self) -> &[Island] {
        &self.segmentation.islands
    }

    /// Parse statistics when the session was built from OBJ text.
    pub fn parse_report(&self) -> Option<&ParseReport> {
        self.report.as_ref()
    }

    pub fn texture_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The UV island containing `face`.
    pub fn island_for_face(&self, face: usize) -> Option<&Island> {
        self.segmentation.island_containing_face(face)
    }

    /// White-on-transparent fill of the island containing `face`.
    pub fn island_mask(&self, face: usize) -> UvResult<Option<RasterBuffer>> {
        let Some(island) = self.island_for_face(face) else {
            return Ok(None);
        };
        let mask = rasterize_faces(&self.mesh, &island.faces, self.width, self.height, Color::WHITE)?;
        Ok(Some(mask))
    }

    /// Boundary edges of every island.
    pub fn outline(&self, options: &OutlineOptions) -> UvResult<OutlineRaster> {
        Ok(rasterize_outline(&self.mesh, self.width, self.height, options)?)
    }

    /// Simplify a drawn UV sheet and label its merged regions.
    pub fn simplify(&self, sheet: &RasterBuffer, options: &SimplifyOptions) -> UvResult<SimplifiedRegions> {
        let sheet = simplify_sheet(sheet, options)?;
        let labels = label_components(&sheet.closed);
        debug!(regions = labels.component_count(), "labelled simplified regions");
        Ok(SimplifiedRegions { sheet, labels })
    }

    /// Faces sharing a simplified region with `face`.
    ///
    /// Simplifies `sheet` first; use [`UvSession::simplified_island_in`]
    /// to reuse one simplification for many lookups.
    pub fn simplified_island_for_face(
        &self,
        face: usize,
        sheet: &RasterBuffer,
        options: &SimplifyOptions,
    ) -> UvResult<Option<SimplifiedIsland>> {
        let regions = self.simplify(sheet, options)?;
        Ok(self.simplified_island_in(face, &regions))
    }

    /// Faces whose UV centroid falls in the same region as `face`'s.
    ///
    /// Only segmented faces take part. When `face`'s centroid is outside
    /// every region the face's own UV island is returned instead. `None`
    /// if `face` has no island.
    pub fn simplified_island_in(&self, face: usize, regions: &SimplifiedRegions) -> Option<SimplifiedIsland> {
        let island = self.island_for_face(face)?;
        let labels = &regions.labels;

        let region_of = |f: usize| -> u32 {
            self.mesh
                .face_uv_centroid(f)
                .map(|c| {
                    let (x, y) = uv_to_pixel(c, labels.width(), labels.height());
                    labels.label(x as u32, y as u32)
                })
                .unwrap_or(0)
        };

        let region = region_of(face);
        if region == 0 {
            let mut faces = island.faces.clone();
            faces.sort_unstable();
            return Some(SimplifiedIsland {
                region: None,
                faces,
            });
        }

        let faces: Vec<usize> = (0..self.mesh.face_count())
            .filter(|&f| self.segmentation.island_index_of(f).is_some())
            .filter(|&f| region_of(f) == region)
            .collect();
        debug!(face, region, faces = faces.len(), "matched simplified island");
        Some(SimplifiedIsland {
            region: Some(region),
            faces,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_TRIANGLES: &str = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\n\
        vt 0.1 0.1\nvt 0.4 0.1\nvt 0.4 0.4\nvt 0.6 0.6\nvt 0.9 0.6\nvt 0.9 0.9\n\
        f 1/1 2/2 3/3\nf 1/4 3/5 4/6\n";

    fn open(width: u32, height: u32) -> UvResult<UvSession> {
        UvSession::from_obj(
            TWO_TRIANGLES,
            &ParseOptions::default(),
            &SegmentOptions::default(),
            width,
            height,
        )
    }

    #[test]
    fn test_zero_texture_rejected() {
        assert!(open(0, 16).is_err());
    }

    #[test]
    fn test_island_queries() {
        let session = open(32, 32).unwrap();
        assert_eq!(session.islands().len(), 2);
        assert_eq!(session.island_for_face(1).map(|i| i.faces.clone()), Some(vec![1]));
        assert!(session.island_for_face(2).is_none());
        assert!(session.island_mask(5).unwrap().is_none());
        assert!(session.island_mask(0).unwrap().unwrap().count_on() > 0);
        assert_eq!(session.parse_report().map(|r| r.skipped_lines), Some(0));
    }

    #[test]
    fn test_simplified_falls_back_outside_regions() {
        let session = open(32, 32).unwrap();
        let blank = RasterBuffer::new(32, 32).unwrap();
        let found = session
            .simplified_island_for_face(0, &blank, &SimplifyOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(found.region, None);
        assert_eq!(found.faces, vec![0]);
    }
}

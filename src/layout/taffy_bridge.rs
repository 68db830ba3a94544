//! Taffy Bridge - section offsets from a flexbox column.
//!
//! The page is a single flex column: padded at the top to clear the fixed
//! navbar, with a constant gap between sections and a capped content width.
//! Each section becomes a leaf of fixed height. Taffy positions them and the
//! resulting `y` offsets become the scroll anchors.

use taffy::{
    AvailableSpace, Dimension, Display, FlexDirection, LengthPercentage, NodeId, Rect as TaffyRect,
    Size, Style, TaffyTree,
};
use tracing::debug;

use crate::config::FolioConfig;
use crate::error::Result;
use crate::types::{Section, Viewport};

use super::types::{PageGeometry, SectionBlock};

// =============================================================================
// STYLE BUILDING
// =============================================================================

/// Root column style. Bottom padding mirrors the section gap.
fn page_style(viewport: &Viewport, config: &FolioConfig) -> Style {
    Style {
        display: Display::Flex,
        flex_direction: FlexDirection::Column,
        size: Size {
            width: Dimension::Length(viewport.width as f32),
            height: Dimension::Auto,
        },
        max_size: Size {
            width: Dimension::Length(config.max_content_width),
            height: Dimension::Auto,
        },
        padding: TaffyRect {
            top: LengthPercentage::Length(config.page_padding_top),
            right: LengthPercentage::Length(0.0),
            bottom: LengthPercentage::Length(config.section_gap),
            left: LengthPercentage::Length(0.0),
        },
        gap: Size {
            width: LengthPercentage::Length(0.0),
            height: LengthPercentage::Length(config.section_gap),
        },
        ..Default::default()
    }
}

fn section_style(block: &SectionBlock, viewport: &Viewport) -> Style {
    Style {
        display: Display::Flex,
        // Sections keep their height even when the column overflows
        flex_shrink: 0.0,
        size: Size {
            width: Dimension::Auto,
            height: Dimension::Length(block.height.resolve(viewport.height).max(0.0)),
        },
        ..Default::default()
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Lay out `blocks` top to bottom for `viewport`.
///
/// Returns the section offsets in document order plus the document height.
pub fn compute_sections(
    blocks: &[SectionBlock],
    viewport: &Viewport,
    config: &FolioConfig,
) -> Result<PageGeometry> {
    let mut tree: TaffyTree<()> = TaffyTree::new();

    let leaves = blocks
        .iter()
        .map(|block| tree.new_leaf(section_style(block, viewport)))
        .collect::<std::result::Result<Vec<NodeId>, _>>()?;
    let root = tree.new_with_children(page_style(viewport, config), &leaves)?;

    let available = Size {
        width: AvailableSpace::Definite(viewport.width as f32),
        height: AvailableSpace::MaxContent,
    };
    tree.compute_layout(root, available)?;

    let mut sections = Vec::with_capacity(blocks.len());
    for (block, &node) in blocks.iter().zip(&leaves) {
        let layout = tree.layout(node)?;
        sections.push(Section::new(
            block.id.clone(),
            f64::from(layout.location.y),
            f64::from(layout.size.height),
        ));
    }

    let page = tree.layout(root)?;
    let geometry = PageGeometry {
        sections,
        content_width: f64::from(page.size.width),
        document_height: f64::from(page.size.height),
    };

    debug!(
        sections = geometry.sections.len(),
        document_height = geometry.document_height,
        width = viewport.width,
        "section layout computed"
    );

    Ok(geometry)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks() -> Vec<SectionBlock> {
        vec![
            SectionBlock::screen("home", 1.0),
            SectionBlock::fixed("about", 600.0),
            SectionBlock::fixed("projects", 900.0),
        ]
    }

    #[test]
    fn test_compute_sections_empty() {
        let geometry =
            compute_sections(&[], &Viewport::default(), &FolioConfig::default()).unwrap();

        assert!(geometry.sections.is_empty());
        // Top padding plus bottom padding
        assert_eq!(geometry.document_height, 144.0);
    }

    #[test]
    fn test_sections_stack_with_gap() {
        let viewport = Viewport::new(0.0, 1280.0, 800.0);
        let geometry = compute_sections(&blocks(), &viewport, &FolioConfig::default()).unwrap();

        let tops: Vec<f64> = geometry.sections.iter().map(|s| s.top_offset).collect();
        assert_eq!(tops, vec![64.0, 944.0, 1624.0]);
        assert_eq!(geometry.sections[0].height, 800.0);
        assert_eq!(geometry.document_height, 2604.0);
    }

    #[test]
    fn test_content_width_capped() {
        let config = FolioConfig::default();

        let wide = compute_sections(&blocks(), &Viewport::new(0.0, 1920.0, 800.0), &config).unwrap();
        assert_eq!(wide.content_width, 1152.0);

        let narrow = compute_sections(&blocks(), &Viewport::new(0.0, 500.0, 800.0), &config).unwrap();
        assert_eq!(narrow.content_width, 500.0);
    }

    #[test]
    fn test_viewport_height_moves_later_sections() {
        let config = FolioConfig::default();
        let short = compute_sections(&blocks(), &Viewport::new(0.0, 1280.0, 600.0), &config).unwrap();

        assert_eq!(short.section("about").unwrap().top_offset, 744.0);
        assert_eq!(short.max_scroll(600.0), 2404.0 - 600.0);
    }
}

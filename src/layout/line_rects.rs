use super::container::Container;
use crate::rect::Rect;
use crate::units::Pt;

/// Split `line` around `exclusion`, dropping pieces with no width
fn line_fragments(line: Rect, exclusion: &Rect) -> Vec<Rect> {
    if !exclusion.intersects(&line) {
        return vec![line];
    }

    let left = Rect {
        width: exclusion.x - line.x,
        ..line
    };
    let right = Rect {
        x: exclusion.right(),
        width: line.right() - exclusion.right(),
        ..line
    };

    [left, right]
        .into_iter()
        .filter(|fragment| fragment.width.is_positive())
        .collect()
}

fn band_fragments(band: Rect, exclusions: &[Rect]) -> Vec<Rect> {
    exclusions.iter().fold(vec![band], |fragments, exclusion| {
        fragments
            .into_iter()
            .flat_map(|fragment| line_fragments(fragment, exclusion))
            .collect()
    })
}

/// The rects lines of a paragraph are placed into, in order.
///
/// A multi-column container yields one full-height rect per column. Otherwise
/// the container is cut into `line_height` bands for as long as any exclusion
/// reaches, each band split around the exclusions it touches, followed by the
/// unobstructed remainder.
pub fn generate_line_rects(container: &Container, line_height: Pt) -> Vec<Rect> {
    if container.is_multi_column() {
        return container.column_rects();
    }

    let Some(max_y) = container
        .exclude_rects
        .iter()
        .map(Rect::bottom)
        .reduce(Pt::max)
    else {
        return vec![container.rect];
    };

    if !line_height.is_positive() {
        return vec![container.rect];
    }

    let mut rects = Vec::new();
    let mut current = container.rect;

    while current.y < max_y {
        let (band, rest) = current.partition(line_height);
        rects.extend(band_fragments(band, &container.exclude_rects));
        current = Rect {
            height: rest.height.max(Pt::ZERO),
            ..rest
        };
    }

    rects.push(current);
    rects
}

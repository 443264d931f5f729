use std::collections::VecDeque;

use crate::core::data::density_map::DensityMap;
use crate::core::data::frame_spec::SearchDirections;
use crate::core::data::point::Point;

fn neighbours(point: Point, map: &DensityMap, directions: SearchDirections) -> Vec<Point> {
    let size = map.size();
    let mut out = Vec::with_capacity(4);

    if directions.left && point.x > 0 {
        out.push(Point {
            x: point.x - 1,
            y: point.y,
        });
    }
    if directions.right && point.x + 1 < size.width() {
        out.push(Point {
            x: point.x + 1,
            y: point.y,
        });
    }
    if directions.up && point.y > 0 {
        out.push(Point {
            x: point.x,
            y: point.y - 1,
        });
    }
    if directions.down && point.y + 1 < size.height() {
        out.push(Point {
            x: point.x,
            y: point.y + 1,
        });
    }

    out
}

/// Breadth-first search from the frame centre for the nearest interesting pixel.
///
/// Moves are restricted to `directions` and expanded left, right, up, down. The first
/// interesting pixel dequeued is returned, so ties at equal step distance go to whichever
/// was enqueued first. `None` means every reachable pixel was visited without a hit.
#[must_use]
pub fn find_interesting_point(map: &DensityMap, directions: SearchDirections) -> Option<Point> {
    let size = map.size();
    let start = size.center();
    let mut visited = vec![false; size.pixel_count()];
    let mut queue = VecDeque::from([start]);
    visited[size.index_of(start)] = true;

    while let Some(point) = queue.pop_front() {
        if map.is_interesting(point) {
            return Some(point);
        }

        for next in neighbours(point, map, directions) {
            let index = size.index_of(next);
            if !visited[index] {
                visited[index] = true;
                queue.push_back(next);
            }
        }
    }

    None
}

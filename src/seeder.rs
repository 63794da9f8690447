use crate::ColorPoint;

/// Pick `k` initial centroids from the given points using farthest-point ("max-min") seeding.
///
/// The first centroid is always the first point. Every following centroid is the point whose distance to its nearest
/// already chosen centroid is the largest. Ties go to the earliest point in scan order, so the same points always
/// produce the same seeds. When there are fewer distinct colors than `k`, every remaining candidate sits at distance
/// zero and the first point is reused for the surplus seeds.
///
/// An empty point set yields no centroids.
pub fn seed_centroids(points: &[ColorPoint], k: usize) -> Vec<ColorPoint> {
    let Some(&first) = points.first() else {
        return Vec::new();
    };

    let mut centroids = Vec::with_capacity(k);
    if k == 0 {
        return centroids;
    }

    centroids.push(first);

    // the distance of every point to its nearest chosen centroid so far, updated incrementally as seeds are added
    let mut nearest: Vec<u32> = points.iter().map(|point| point.squared_distance(first)).collect();

    while centroids.len() < k {
        let mut farthest = 0;
        let mut farthest_distance = None;

        for (index, &distance) in nearest.iter().enumerate() {
            if farthest_distance.map_or(true, |best| distance > best) {
                farthest = index;
                farthest_distance = Some(distance);
            }
        }

        let seed = points[farthest];
        centroids.push(seed);

        for (distance, point) in nearest.iter_mut().zip(points) {
            *distance = (*distance).min(point.squared_distance(seed));
        }
    }

    centroids
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: ColorPoint = ColorPoint::new(255, 0, 0);
    const GREEN: ColorPoint = ColorPoint::new(0, 255, 0);
    const BLUE: ColorPoint = ColorPoint::new(0, 0, 255);
    const YELLOW: ColorPoint = ColorPoint::new(255, 255, 0);

    #[test]
    fn first_seed_is_first_point() {
        let points = [YELLOW, RED, GREEN];
        assert_eq!(seed_centroids(&points, 1), vec![YELLOW]);
    }

    #[test]
    fn picks_farthest_points_in_order() {
        let points = [RED, RED, YELLOW, GREEN, BLUE];
        // green and blue are equally far from red; green comes first in scan order
        assert_eq!(seed_centroids(&points, 4), vec![RED, GREEN, BLUE, YELLOW]);
    }

    #[test]
    fn farthest_from_all_chosen_seeds() {
        let dark = ColorPoint::new(10, 10, 10);
        let gray = ColorPoint::new(120, 120, 120);
        let light = ColorPoint::new(240, 240, 240);
        let near_dark = ColorPoint::new(20, 20, 20);

        let points = [dark, near_dark, gray, light];
        assert_eq!(seed_centroids(&points, 3), vec![dark, light, gray]);
    }

    #[test]
    fn reuses_first_point_when_out_of_distinct_colors() {
        let points = [RED, BLUE];
        assert_eq!(seed_centroids(&points, 5), vec![RED, BLUE, RED, RED, RED]);
    }

    #[test]
    fn empty_points_yield_no_seeds() {
        assert!(seed_centroids(&[], 3).is_empty());
        assert!(seed_centroids(&[RED], 0).is_empty());
    }

    #[test]
    fn seeding_is_deterministic() {
        let points: Vec<ColorPoint> = (0..=255u8).map(|i| ColorPoint::new(i, 255 - i, i / 2)).collect();
        assert_eq!(seed_centroids(&points, 6), seed_centroids(&points, 6));
    }
}

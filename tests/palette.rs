use dominance::{
    extract_palette, sample_points, seed_centroids, ColorPoint, KMeans, Palette, PixelGrid, DEFAULT_MAX_ITERATIONS,
    DEFAULT_SAMPLE_STEP,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

const RED: ColorPoint = ColorPoint::new(255, 0, 0);
const GREEN: ColorPoint = ColorPoint::new(0, 255, 0);
const BLUE: ColorPoint = ColorPoint::new(0, 0, 255);
const YELLOW: ColorPoint = ColorPoint::new(255, 255, 0);

fn grid_from_colors(colors: &[ColorPoint]) -> PixelGrid {
    let data = colors
        .iter()
        .flat_map(|color| [color.red(), color.green(), color.blue(), 255])
        .collect();

    PixelGrid::new(colors.len() as u32, 1, data).unwrap()
}

fn random_grid(rng: &mut StdRng) -> PixelGrid {
    let width = rng.gen_range(1..=60);
    let height = rng.gen_range(1..=60);
    let data = (0..width * height * 4).map(|_| rng.gen::<u8>()).collect();

    PixelGrid::new(width, height, data).unwrap()
}

#[test]
fn four_solid_colors() {
    let mut colors = Vec::new();
    for color in [RED, GREEN, BLUE, YELLOW] {
        colors.extend(std::iter::repeat(color).take(40));
    }

    let palette = Palette::from_grid(grid_from_colors(&colors))
        .sample_step(1)
        .color_count(4)
        .generate()
        .unwrap();

    assert_eq!(palette.keys().collect::<Vec<_>>(), vec!["255-0-0", "0-255-0", "0-0-255", "255-255-0"]);
    assert!(palette.entries().iter().all(|entry| entry.count() == 40));
    assert!(palette.converged());
    assert_eq!(palette.iterations(), 1);
}

#[test]
fn returns_exactly_k_entries_summing_to_samples() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..25 {
        let grid = random_grid(&mut rng);
        let k = rng.gen_range(1..=8);

        let entries = extract_palette(&grid, k);
        let sampled = sample_points(&grid, DEFAULT_SAMPLE_STEP).len();

        assert_eq!(entries.len(), k);
        assert_eq!(entries.iter().map(|entry| entry.count() as usize).sum::<usize>(), sampled);
        assert!(entries.windows(2).all(|pair| pair[0].count() >= pair[1].count()));
    }
}

#[test]
fn extraction_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..10 {
        let grid = random_grid(&mut rng);
        let first = extract_palette(&grid, 5);
        let second = extract_palette(&grid.clone(), 5);

        assert_eq!(first, second);
    }
}

#[test]
fn seeds_are_farthest_from_previous_seeds() {
    let mut rng = StdRng::seed_from_u64(3);
    let points: Vec<ColorPoint> = (0..300)
        .map(|_| ColorPoint::new(rng.gen(), rng.gen(), rng.gen()))
        .collect();

    let seeds = seed_centroids(&points, 6);
    assert_eq!(seeds.len(), 6);
    assert_eq!(seeds[0], points[0]);

    for i in 1..seeds.len() {
        let nearest_seed = |point: &ColorPoint| seeds[..i].iter().map(|seed| point.distance(*seed)).fold(f64::MAX, f64::min);
        let best = points.iter().map(nearest_seed).fold(0.0, f64::max);

        assert_eq!(nearest_seed(&seeds[i]), best);
        // the first point reaching the maximum is the one picked
        let first_best = points.iter().find(|point| nearest_seed(*point) == best).unwrap();
        assert_eq!(&seeds[i], first_best);
    }
}

#[test]
fn never_exceeds_iteration_cap() {
    let mut rng = StdRng::seed_from_u64(11);

    for _ in 0..10 {
        let grid = random_grid(&mut rng);
        let points = sample_points(&grid, 1);
        let result = KMeans::new(8).run(&points);

        assert!(result.iterations <= DEFAULT_MAX_ITERATIONS);
        assert_eq!(result.clusters.len(), 8);
    }
}

#[test]
fn empty_grid_gives_no_entries() {
    let grid = PixelGrid::new(0, 0, Vec::new()).unwrap();
    assert!(extract_palette(&grid, 3).is_empty());

    let palette = Palette::from_grid(grid).generate().unwrap();
    assert!(palette.is_empty());
    assert_eq!(palette.dominant_color(), None);
}

#[test]
fn fewer_distinct_colors_than_k() {
    let palette = Palette::from_grid(grid_from_colors(&[RED, BLUE]))
        .sample_step(1)
        .color_count(5)
        .generate()
        .unwrap();

    let counts: Vec<u32> = palette.entries().iter().map(|entry| entry.count()).collect();
    assert_eq!(counts, vec![1, 1, 0, 0, 0]);
    assert_eq!(palette.keys().collect::<Vec<_>>(), vec!["255-0-0", "0-0-255", "255-0-0", "255-0-0", "255-0-0"]);
}

#[test]
fn alpha_does_not_affect_palette() {
    let opaque = grid_from_colors(&[RED, GREEN, GREEN]);
    let mut data = opaque.clone().into_raw();
    for alpha in data.iter_mut().skip(3).step_by(4) {
        *alpha = 0;
    }
    let transparent = PixelGrid::new(3, 1, data).unwrap();

    assert_eq!(extract_palette(&opaque, 2), extract_palette(&transparent, 2));
}

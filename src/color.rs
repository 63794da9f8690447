/// A single sampled color: three raw 8-bit channels, alpha already discarded.
///
/// Points have no identity beyond their value; duplicates in a point set are meaningful since they carry the density
/// of a color in the image. Centroids use the same representation since their means are rounded back to integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorPoint {
    red: u8,
    green: u8,
    blue: u8,
}

impl ColorPoint {
    pub const fn new(red: u8, green: u8, blue: u8) -> ColorPoint {
        Self { red, green, blue }
    }

    pub fn red(self) -> u8 {
        self.red
    }

    pub fn green(self) -> u8 {
        self.green
    }

    pub fn blue(self) -> u8 {
        self.blue
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    /// Squared Euclidean distance over the three channels. The largest possible value is 3 * 255^2, well within `u32`.
    pub fn squared_distance(self, other: ColorPoint) -> u32 {
        let dr = self.red.abs_diff(other.red) as u32;
        let dg = self.green.abs_diff(other.green) as u32;
        let db = self.blue.abs_diff(other.blue) as u32;

        dr * dr + dg * dg + db * db
    }

    pub fn distance(self, other: ColorPoint) -> f64 {
        (self.squared_distance(other) as f64).sqrt()
    }

    /// The canonical `R-G-B` key of this color, in plain decimal.
    pub fn key(self) -> String {
        format!("{}-{}-{}", self.red, self.green, self.blue)
    }
}

impl From<(u8, u8, u8)> for ColorPoint {
    fn from((red, green, blue): (u8, u8, u8)) -> Self {
        Self::new(red, green, blue)
    }
}

impl From<ColorPoint> for (u8, u8, u8) {
    fn from(color: ColorPoint) -> Self {
        color.rgb()
    }
}

impl From<image::Rgba<u8>> for ColorPoint {
    fn from(pixel: image::Rgba<u8>) -> Self {
        let [red, green, blue, _] = pixel.0;
        Self::new(red, green, blue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_between_primaries() {
        let red = ColorPoint::new(255, 0, 0);
        let green = ColorPoint::new(0, 255, 0);

        assert_eq!(red.squared_distance(green), 2 * 255 * 255);
        assert_eq!(red.squared_distance(red), 0);
        assert!((red.distance(green) - 360.624).abs() < 0.001);
    }

    #[test]
    fn maximum_distance_does_not_overflow() {
        let black = ColorPoint::new(0, 0, 0);
        let white = ColorPoint::new(255, 255, 255);

        assert_eq!(black.squared_distance(white), 195_075);
        assert_eq!(white.squared_distance(black), 195_075);
    }

    #[test]
    fn key_is_dash_joined_decimal() {
        assert_eq!(ColorPoint::new(255, 7, 0).key(), "255-7-0");
        assert_eq!(ColorPoint::new(0, 0, 0).key(), "0-0-0");
    }

    #[test]
    fn alpha_is_dropped_from_rgba_pixels() {
        let color = ColorPoint::from(image::Rgba([10, 20, 30, 0]));
        assert_eq!(color.rgb(), (10, 20, 30));
    }
}

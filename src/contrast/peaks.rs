//! Dominant colour selection from a luminosity-sorted histogram.

use super::histogram::DataPoint;

/// Points whose count is a local maximum along the luminosity axis.
///
/// A point is kept when its count is not exceeded by the point before it
/// and the count then drops. A sequence still rising at the end keeps its
/// last point.
pub fn local_maxima(points: &[DataPoint]) -> Vec<DataPoint> {
    let mut maxima = Vec::new();
    let mut rising = true;

    for pair in points.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        if next.count < prev.count {
            if rising {
                maxima.push(prev);
            }
            rising = false;
        } else if next.count > prev.count {
            rising = true;
        }
    }

    if rising {
        if let Some(last) = points.last() {
            maxima.push(*last);
        }
    }
    maxima
}

/// The most and second most present points.
///
/// Later points win ties at each rank. A missing point is
/// [`DataPoint::absent`].
pub fn two_most_present(points: &[DataPoint]) -> (DataPoint, DataPoint) {
    let mut first = DataPoint::absent();
    let mut second = DataPoint::absent();

    for point in points {
        if point.count >= first.count {
            second = first;
            first = *point;
        } else if point.count >= second.count {
            second = *point;
        }
    }
    (first, second)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(counts: &[usize]) -> Vec<DataPoint> {
        counts
            .iter()
            .enumerate()
            .map(|(i, &count)| DataPoint {
                color: [i as u8; 3],
                luminosity: i as f64 / 10.0,
                count,
            })
            .collect()
    }

    fn counts(maxima: &[DataPoint]) -> Vec<usize> {
        maxima.iter().map(|p| p.count).collect()
    }

    #[test]
    fn test_two_peaks() {
        let maxima = local_maxima(&points(&[1, 5, 2, 1, 9, 3]));
        assert_eq!(counts(&maxima), vec![5, 9]);
    }

    #[test]
    fn test_rising_to_the_end() {
        let maxima = local_maxima(&points(&[1, 2, 3]));
        assert_eq!(counts(&maxima), vec![3]);
    }

    #[test]
    fn test_first_point_peak() {
        let maxima = local_maxima(&points(&[8, 2, 2, 6]));
        assert_eq!(counts(&maxima), vec![8, 6]);
    }

    #[test]
    fn test_plateau_keeps_last_point() {
        let maxima = local_maxima(&points(&[1, 4, 4, 1]));
        assert_eq!(maxima.len(), 1);
        assert_eq!(maxima[0].luminosity, 0.2);
    }

    #[test]
    fn test_single_point() {
        let maxima = local_maxima(&points(&[7]));
        assert_eq!(counts(&maxima), vec![7]);
        assert!(local_maxima(&[]).is_empty());
    }

    #[test]
    fn test_two_most_present() {
        let (first, second) = two_most_present(&points(&[5, 9, 3]));
        assert_eq!(first.count, 9);
        assert_eq!(second.count, 5);
    }

    #[test]
    fn test_ties_prefer_later_points() {
        let (first, second) = two_most_present(&points(&[4, 4, 4]));
        assert_eq!(first.luminosity, 0.2);
        assert_eq!(second.luminosity, 0.1);
    }

    #[test]
    fn test_missing_second_is_absent() {
        let (first, second) = two_most_present(&points(&[4]));
        assert_eq!(first.count, 4);
        assert!(second.is_absent());
        let (first, _) = two_most_present(&[]);
        assert!(first.is_absent());
    }
}

//! Multiply-by-four then keep-multiples-of-four, over an iterator or a stream.

use futures::{future, Stream, StreamExt};

pub fn quadruple(value: u32) -> u32 {
    value * 4
}

pub fn is_multiple_of_four(value: &u32) -> bool {
    value % 4 == 0
}

pub fn transform<I>(values: I) -> Vec<u32>
where
    I: IntoIterator<Item = u32>,
{
    values
        .into_iter()
        .map(quadruple)
        .filter(is_multiple_of_four)
        .collect()
}

pub fn transform_stream<S>(values: S) -> impl Stream<Item = u32>
where
    S: Stream<Item = u32>,
{
    values
        .map(quadruple)
        .filter(|value| future::ready(is_multiple_of_four(value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::one_nine::{produce_flux, sequence};
    use crate::pacing::Pacing;
    use std::time::Duration;

    const QUADRUPLED: [u32; 9] = [4, 8, 12, 16, 20, 24, 28, 32, 36];

    #[test]
    fn test_transform_keeps_every_quadrupled_value() {
        let values = transform(sequence());
        assert_eq!(values, QUADRUPLED);
        // Every input survives the filter
        assert_eq!(values.len(), sequence().count());
    }

    #[test]
    fn test_filter_drops_values_that_are_not_multiples_of_four() {
        let kept: Vec<u32> = sequence().filter(is_multiple_of_four).collect();
        assert_eq!(kept, vec![4, 8]);
    }

    #[test]
    fn test_transform_length_follows_the_input() {
        assert_eq!(transform(1..=3), vec![4, 8, 12]);
        assert_eq!(transform(1..=12).len(), 12);
        assert!(transform(std::iter::empty()).is_empty());
    }

    #[tokio::test]
    async fn test_transform_stream_matches_transform() {
        let values: Vec<u32> = transform_stream(futures::stream::iter(sequence()))
            .collect()
            .await;
        assert_eq!(values, QUADRUPLED);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transform_stream_over_a_flux() {
        let flux = produce_flux(Pacing::uninterruptible(Duration::from_millis(500)));
        let values: Vec<u32> = transform_stream(flux).collect().await;
        assert_eq!(values, QUADRUPLED);
    }
}

#[cfg(feature = "rayon")]
mod rayon_tests {
    use monodither::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    // Large enough that rayon actually splits the rows across threads.
    const WIDTH: u32 = 317;
    const HEIGHT: u32 = 211;

    fn source(seed: u64) -> PixelBuffer {
        let mut rng = StdRng::seed_from_u64(seed);
        let data = (0..WIDTH * HEIGHT * 4).map(|_| rng.random()).collect();
        PixelBuffer::from_raw(WIDTH, HEIGHT, data).unwrap()
    }

    // Plain single-threaded versions of the row-parallel passes.

    fn sequential_grayscale(data: &mut [u8]) {
        for px in data.chunks_exact_mut(4) {
            let y = store_sample(luminance(px[0], px[1], px[2]));
            px[..3].fill(y);
        }
    }

    fn sequential_threshold(data: &mut [u8], cutoff: Threshold) {
        for px in data.chunks_exact_mut(4) {
            let v = if f64::from(px[0]) > cutoff.cutoff() { 255 } else { 0 };
            px[..3].fill(v);
        }
    }

    fn sequential_ordered(data: &mut [u8], matrix: &ThresholdMatrix) {
        for (i, px) in data.chunks_exact_mut(4).enumerate() {
            let x = i % WIDTH as usize;
            let y = i / WIDTH as usize;
            let cutoff = matrix.cutoff(matrix.tiled(x, y));
            let v = if f64::from(px[0]) > cutoff { 255 } else { 0 };
            px[..3].fill(v);
        }
    }

    #[test]
    fn test_rayon_grayscale_matches_sequential() {
        let mut parallel = source(1);
        let mut expected = parallel.clone().into_raw();

        grayscale(&mut parallel);
        sequential_grayscale(&mut expected);
        assert_eq!(parallel.as_raw(), &expected[..]);
    }

    #[test]
    fn test_rayon_threshold_matches_sequential() {
        let mut gray = source(2);
        grayscale(&mut gray);

        for level in [0, 33, 46, 100] {
            let cutoff = Threshold::from_level(level);
            let mut parallel = gray.clone();
            let mut expected = gray.clone().into_raw();

            threshold(&mut parallel, cutoff);
            sequential_threshold(&mut expected, cutoff);
            assert_eq!(parallel.as_raw(), &expected[..], "level {level}");
        }
    }

    #[test]
    fn test_rayon_ordered_matches_sequential() {
        let mut gray = source(3);
        grayscale(&mut gray);

        for method in [
            DitherMethod::Bayer2,
            DitherMethod::Bayer4,
            DitherMethod::Bayer8,
            DitherMethod::Clustered4x4,
        ] {
            let matrix = method.matrix().unwrap();
            let mut parallel = gray.clone();
            let mut expected = gray.clone().into_raw();

            ordered_dither(&mut parallel, &matrix);
            sequential_ordered(&mut expected, &matrix);
            assert_eq!(parallel.as_raw(), &expected[..], "{method}");
        }
    }

    #[test]
    fn test_rayon_stretch_is_stable() {
        let mut gray = source(4);
        grayscale(&mut gray);

        let cutoff = Threshold::from_level(46);
        let mut a = gray.clone();
        let mut b = gray;
        stretch(&mut a, cutoff);
        stretch(&mut b, cutoff);
        assert_eq!(a, b);
    }
}

use super::fft::ComplexSpectrum;

/// Magnitude of each bin up to (not including) Nyquist.
///
/// The upper half of a real signal's transform mirrors the lower half, so
/// only the first `N/2` bins are returned.
pub fn magnitudes(spectrum: &ComplexSpectrum) -> Vec<f64> {
    let half = spectrum.len() / 2;
    spectrum.re[..half]
        .iter()
        .zip(spectrum.im[..half].iter())
        .map(|(re, im)| (re * re + im * im).sqrt())
        .collect()
}

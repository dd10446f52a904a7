/// Anything that can hand out a byte-resolution frequency snapshot.
///
/// The web frontend implements this for a WebAudio `AnalyserNode`; tests use
/// fixed arrays.
pub trait FrequencySource {
    fn bin_count(&self) -> usize;
    fn read_bytes(&mut self, out: &mut [u8]);
}

impl FrequencySource for [u8] {
    fn bin_count(&self) -> usize {
        self.len()
    }

    fn read_bytes(&mut self, out: &mut [u8]) {
        let n = out.len().min(self.len());
        out[..n].copy_from_slice(&self[..n]);
    }
}

impl FrequencySource for Vec<u8> {
    fn bin_count(&self) -> usize {
        self.len()
    }

    fn read_bytes(&mut self, out: &mut [u8]) {
        self.as_mut_slice().read_bytes(out);
    }
}

/// Per-frame frequency snapshot plus its average amplitude.
///
/// The buffer is reused across frames and only reallocated if the source
/// changes resolution.
#[derive(Clone, Debug, Default)]
pub struct Spectrum {
    bins: Vec<u8>,
    average: f32,
}

impl Spectrum {
    pub fn with_bins(bins: usize) -> Self {
        Self {
            bins: vec![0; bins],
            average: 0.0,
        }
    }

    pub fn refresh(&mut self, source: &mut dyn FrequencySource) {
        let n = source.bin_count();
        if self.bins.len() != n {
            self.bins.resize(n, 0);
        }
        source.read_bytes(&mut self.bins);
        self.average = if n == 0 {
            0.0
        } else {
            self.bins.iter().map(|b| *b as u32).sum::<u32>() as f32 / n as f32
        };
    }

    pub fn bins(&self) -> &[u8] {
        &self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn average(&self) -> f32 {
        self.average
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_copies_and_averages() {
        let mut src = vec![0u8, 100, 200, 100];
        let mut s = Spectrum::with_bins(4);
        s.refresh(&mut src);
        assert_eq!(s.bins(), &[0, 100, 200, 100]);
        assert_eq!(s.average(), 100.0);
    }

    #[test]
    fn refresh_follows_source_resolution() {
        let mut src = vec![255u8; 8];
        let mut s = Spectrum::with_bins(4);
        s.refresh(&mut src);
        assert_eq!(s.len(), 8);
        assert_eq!(s.average(), 255.0);

        let mut empty: Vec<u8> = Vec::new();
        s.refresh(&mut empty);
        assert!(s.is_empty());
        assert_eq!(s.average(), 0.0);
    }
}

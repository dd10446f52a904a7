use festa_core::{AudioControls, FrameParams, FrequencySource, RingParams};
use web_sys as web;

/// Byte-frequency reader over a WebAudio analyser.
pub struct AnalyserTap {
    node: web::AnalyserNode,
}

impl FrequencySource for AnalyserTap {
    fn bin_count(&self) -> usize {
        self.node.frequency_bin_count() as usize
    }

    fn read_bytes(&mut self, out: &mut [u8]) {
        self.node.get_byte_frequency_data(out);
    }
}

/// Looping music element routed through two analysers (one per visualizer)
/// to the speakers.
pub struct AudioRig {
    ctx: web::AudioContext,
    element: web::HtmlAudioElement,
    pub ring: AnalyserTap,
    pub frame: AnalyserTap,
    applied: Option<AudioControls>,
}

fn create_analyser(
    ctx: &web::AudioContext,
    fft_size: u32,
    smoothing: Option<f64>,
    label: &str,
) -> anyhow::Result<web::AnalyserNode> {
    let node = web::AnalyserNode::new(ctx)
        .map_err(|e| anyhow::anyhow!("{} AnalyserNode error: {:?}", label, e))?;
    node.set_fft_size(fft_size);
    if let Some(s) = smoothing {
        node.set_smoothing_time_constant(s);
    }
    Ok(node)
}

impl AudioRig {
    /// Must run inside a user gesture so the context is allowed to start.
    pub fn new(url: &str, ring: &RingParams, frame: &FrameParams) -> anyhow::Result<Self> {
        let ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
        _ = ctx.resume();
        let element = web::HtmlAudioElement::new_with_src(url)
            .map_err(|e| anyhow::anyhow!("audio element error: {:?}", e))?;
        element.set_loop(true);
        element.set_cross_origin(Some("anonymous"));

        let source = ctx
            .create_media_element_source(&element)
            .map_err(|e| anyhow::anyhow!("media source error: {:?}", e))?;
        let ring_node = create_analyser(&ctx, ring.fft_size, None, "ring")?;
        let frame_node = create_analyser(&ctx, frame.fft_size, Some(frame.smoothing), "frame")?;
        _ = source.connect_with_audio_node(&ring_node);
        _ = source.connect_with_audio_node(&frame_node);
        _ = source.connect_with_audio_node(&ctx.destination());
        log::info!(
            "[audio] {} ring_bins={} frame_bins={}",
            url,
            ring_node.frequency_bin_count(),
            frame_node.frequency_bin_count()
        );

        Ok(Self {
            ctx,
            element,
            ring: AnalyserTap { node: ring_node },
            frame: AnalyserTap { node: frame_node },
            applied: None,
        })
    }

    /// Mirror the control state onto the media element when it changed.
    pub fn apply(&mut self, controls: AudioControls) {
        if self.applied == Some(controls) {
            return;
        }
        self.element.set_volume(controls.volume() as f64);
        if controls.is_playing() {
            _ = self.ctx.resume();
            if let Err(e) = self.element.play() {
                log::error!("audio play error: {:?}", e);
            }
        } else if let Err(e) = self.element.pause() {
            log::error!("audio pause error: {:?}", e);
        }
        self.applied = Some(controls);
    }

    /// Analysers only carry signal while the element is actually playing.
    pub fn is_live(&self) -> bool {
        !self.element.paused()
    }
}

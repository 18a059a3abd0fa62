use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AnalyserNode, AudioContext, MediaStream, MediaStreamConstraints};

/// Microphone tap. Holds the context so the graph stays alive.
pub struct MicInput {
    context: AudioContext,
    analyser: AnalyserNode,
}

impl MicInput {
    /// Ask for the microphone and route it into an analyser of `fft_size`.
    pub async fn open(fft_size: usize) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let devices = window.navigator().media_devices()?;

        let constraints = MediaStreamConstraints::new();
        constraints.set_audio(&JsValue::TRUE);
        let stream: MediaStream =
            JsFuture::from(devices.get_user_media_with_constraints(&constraints)?)
                .await?
                .dyn_into()?;

        let context = AudioContext::new()?;
        let analyser = context.create_analyser()?;
        analyser.set_fft_size(fft_size as u32);
        let source = context.create_media_stream_source(&stream)?;
        source.connect_with_audio_node(&analyser)?;

        log::info!("microphone open at {} Hz", context.sample_rate());
        Ok(Self { context, analyser })
    }

    /// Browsers start contexts suspended until a user gesture.
    pub fn resume(&self) {
        if let Err(err) = self.context.resume() {
            log::debug!("audio resume failed: {err:?}");
        }
    }

    /// Match the analyser block to a new FFT size. Only sizes from
    /// [`fft_sizes`](crate::viz::fft_sizes) are accepted by the browser.
    pub fn set_fft_size(&self, fft_size: usize) {
        self.analyser.set_fft_size(fft_size as u32);
    }

    /// Fill `samples` with the latest time-domain block.
    pub fn read(&self, samples: &mut Vec<f32>) {
        samples.resize(self.analyser.fft_size() as usize, 0.0);
        self.analyser.get_float_time_domain_data(samples);
    }
}

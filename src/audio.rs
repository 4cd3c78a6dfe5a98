use lounge_core::{FrequencyAnalyser, MediaElement, MediaKind};
use wasm_bindgen::JsCast;
use web_sys as web;

/// The page's audio context with its single analyser. Built on the first
/// file selection, since browsers only allow audio after a user gesture.
#[derive(Clone)]
pub struct AudioGraph {
    ctx: web::AudioContext,
    analyser: web::AnalyserNode,
}

impl AudioGraph {
    pub fn new(fft_size: usize) -> anyhow::Result<Self> {
        let ctx = web::AudioContext::new().map_err(|e| anyhow::anyhow!("AudioContext: {e:?}"))?;
        let analyser = ctx
            .create_analyser()
            .map_err(|e| anyhow::anyhow!("AnalyserNode: {e:?}"))?;
        analyser.set_fft_size(fft_size as u32);
        analyser
            .connect_with_audio_node(&ctx.destination())
            .map_err(|e| anyhow::anyhow!("analyser -> destination: {e:?}"))?;
        log::info!(
            "[media] audio graph at {} Hz, {} bins",
            ctx.sample_rate(),
            analyser.frequency_bin_count()
        );
        Ok(Self { ctx, analyser })
    }

    pub fn resume(&self) {
        _ = self.ctx.resume();
    }

    pub fn analyser(&self) -> WebAnalyser {
        WebAnalyser {
            node: self.analyser.clone(),
            scratch: Vec::new(),
        }
    }
}

/// Reads the analyser's byte magnitudes into the signal snapshot.
pub struct WebAnalyser {
    node: web::AnalyserNode,
    scratch: Vec<u8>,
}

impl FrequencyAnalyser for WebAnalyser {
    fn read_bytes(&mut self, out: &mut [u8]) {
        let bins = self.node.frequency_bin_count() as usize;
        if bins == out.len() {
            self.node.get_byte_frequency_data(out);
            return;
        }
        self.scratch.resize(bins, 0);
        self.node.get_byte_frequency_data(&mut self.scratch);
        let n = bins.min(out.len());
        out[..n].copy_from_slice(&self.scratch[..n]);
        out[n..].fill(0);
    }
}

/// An `<audio>` or `<video>` element playing a picked file, routed through
/// the analyser.
pub struct WebMedia {
    kind: MediaKind,
    element: web::HtmlMediaElement,
    source: web::MediaElementAudioSourceNode,
    url: String,
}

impl WebMedia {
    pub fn from_file(
        graph: &AudioGraph,
        file: &web::File,
        kind: MediaKind,
        video_layer: Option<&web::Element>,
    ) -> anyhow::Result<Self> {
        let document =
            crate::dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
        let element = document
            .create_element(kind.label())
            .map_err(|e| anyhow::anyhow!("create <{}>: {e:?}", kind.label()))?
            .dyn_into::<web::HtmlMediaElement>()
            .map_err(|e| anyhow::anyhow!("not a media element: {e:?}"))?;
        let url = web::Url::create_object_url_with_blob(file)
            .map_err(|e| anyhow::anyhow!("object url: {e:?}"))?;
        element.set_src(&url);
        if kind == MediaKind::Video {
            _ = element.set_attribute("playsinline", "");
            match video_layer {
                Some(layer) => {
                    _ = layer.append_child(&element);
                }
                None => log::warn!("[media] no video layer; playing audio only"),
            }
        }
        let source = match graph.ctx.create_media_element_source(&element) {
            Ok(s) => s,
            Err(e) => {
                web::Url::revoke_object_url(&url).ok();
                element.remove();
                return Err(anyhow::anyhow!("media source: {e:?}"));
            }
        };
        source
            .connect_with_audio_node(&graph.analyser)
            .map_err(|e| anyhow::anyhow!("source -> analyser: {e:?}"))?;
        Ok(Self {
            kind,
            element,
            source,
            url,
        })
    }

    pub fn play(&self) -> anyhow::Result<js_sys::Promise> {
        self.element
            .play()
            .map_err(|e| anyhow::anyhow!("play: {e:?}"))
    }
}

impl MediaElement for WebMedia {
    fn kind(&self) -> MediaKind {
        self.kind
    }

    fn pause(&mut self) {
        _ = self.element.pause();
    }

    fn detach(&mut self) {
        _ = self.source.disconnect();
        _ = self.element.remove_attribute("src");
        self.element.load();
        _ = web::Url::revoke_object_url(&self.url);
        self.element.remove();
    }
}

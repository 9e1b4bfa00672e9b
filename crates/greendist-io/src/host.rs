//! Offline host: drives the pipeline over a whole buffer the way an audio
//! host drives a plugin, one block at a time.

use crate::wav::AudioBuffer;
use crate::Result;
use greendist_effects::{BlockPipeline, ParamStore, ProcessorConfig};
use std::sync::Arc;

/// Runs a [`BlockPipeline`] over an [`AudioBuffer`] in host-sized blocks.
///
/// The [`ParamStore`] is shared through an [`Arc`], so another thread may
/// change parameters while a file is being processed. Changes take effect
/// at the next block boundary.
pub struct OfflineHost {
    pipeline: BlockPipeline,
    params: Arc<ParamStore>,
    config: ProcessorConfig,
}

impl OfflineHost {
    /// Validate `config` and prepare a pipeline with default parameters.
    pub fn new(config: ProcessorConfig) -> Result<Self> {
        Self::with_params(config, Arc::new(ParamStore::new()))
    }

    /// Like [`new`](Self::new), reading parameters from an existing store.
    pub fn with_params(config: ProcessorConfig, params: Arc<ParamStore>) -> Result<Self> {
        let mut pipeline = BlockPipeline::new();
        pipeline.prepare_with(&config)?;
        tracing::info!(
            "offline host ready: {} Hz, block {}, {:?}",
            config.sample_rate,
            config.max_block_size,
            config.layout
        );
        Ok(Self {
            pipeline,
            params,
            config,
        })
    }

    /// The parameter store the pipeline reads from.
    pub fn params(&self) -> &Arc<ParamStore> {
        &self.params
    }

    /// Configuration the pipeline was prepared with.
    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// The hosted pipeline.
    pub fn pipeline(&self) -> &BlockPipeline {
        &self.pipeline
    }

    /// Clear filter memory between unrelated files.
    pub fn reset(&mut self) {
        self.pipeline.reset();
    }

    /// Process `audio` in place.
    ///
    /// `on_block(done, total)` is called after every block with the number of
    /// frames processed so far and the total frame count.
    ///
    /// Only the frames common to every channel are processed. If the channels
    /// differ in length, the extra tail samples are left untouched.
    pub fn process<F>(&mut self, audio: &mut AudioBuffer, mut on_block: F)
    where
        F: FnMut(usize, usize),
    {
        let total = audio.len();
        let channels = audio.channel_count();
        let block = self.config.max_block_size.max(1);
        tracing::debug!("offline host: {total} frames, {channels} ch, block {block}");
        if audio.channels.iter().any(|c| c.len() != total) {
            tracing::warn!("offline host: channel lengths differ, processing {total} frames");
        }

        let mut chunks: Vec<_> = audio
            .channels
            .iter_mut()
            .map(|channel| channel[..total].chunks_mut(block))
            .collect();
        let mut done = 0;
        while done < total {
            let mut views: Vec<&mut [f32]> = Vec::with_capacity(channels);
            for chunk in &mut chunks {
                if let Some(view) = chunk.next() {
                    views.push(view);
                }
            }
            let frames = views.first().map_or(0, |v| v.len());
            self.pipeline.process(&mut views, channels, &*self.params);
            done += frames;
            on_block(done, total);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use greendist_effects::{ChannelLayout, ConfigError, Param};

    fn sine(len: usize) -> Vec<f32> {
        (0..len)
            .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 48000.0).sin() * 0.5)
            .collect()
    }

    #[test]
    fn rejects_invalid_config() {
        let config = ProcessorConfig::new(0.0, 512, ChannelLayout::Stereo);
        let err = OfflineHost::new(config).err();
        assert!(matches!(
            err,
            Some(crate::Error::Config(ConfigError::InvalidSampleRate(_)))
        ));
    }

    #[test]
    fn reports_progress_per_block() {
        let mut host = OfflineHost::new(ProcessorConfig::new(48000.0, 256, ChannelLayout::Stereo))
            .unwrap();
        let mut audio = AudioBuffer::new(vec![sine(1000), sine(1000)]);

        let mut calls = Vec::new();
        host.process(&mut audio, |done, total| calls.push((done, total)));
        assert_eq!(calls, vec![(256, 1000), (512, 1000), (768, 1000), (1000, 1000)]);
        assert!(audio.channels[0].iter().all(|s| s.is_finite()));
    }

    #[test]
    fn shared_params_are_observed() {
        let params = Arc::new(ParamStore::new());
        let config = ProcessorConfig::new(48000.0, 128, ChannelLayout::Mono);
        let mut host = OfflineHost::with_params(config, Arc::clone(&params)).unwrap();

        params.set(Param::Mix, 0.0);
        let input = sine(512);
        let mut audio = AudioBuffer::new(vec![input.clone()]);
        host.process(&mut audio, |_, _| {});
        assert_eq!(audio.channels[0], input);
        assert_eq!(host.params().get(Param::Mix), 0.0);
    }

    #[test]
    fn uneven_channels_stay_aligned() {
        let config = ProcessorConfig::new(48000.0, 64, ChannelLayout::Stereo);
        let mut host = OfflineHost::new(config).unwrap();
        host.params().set(Param::Tone, 3000.0);

        // Right channel carries 100 extra samples past the left one.
        let left = sine(300);
        let mut right = sine(400);
        right.iter_mut().for_each(|s| *s *= -0.5);
        let mut uneven = AudioBuffer {
            channels: vec![left.clone(), right.clone()],
        };
        host.process(&mut uneven, |_, _| {});

        let mut reference = OfflineHost::new(config).unwrap();
        reference.params().set(Param::Tone, 3000.0);
        let mut even = AudioBuffer::new(vec![left, right[..300].to_vec()]);
        reference.process(&mut even, |_, _| {});

        assert_eq!(uneven.channels[0], even.channels[0]);
        assert_eq!(uneven.channels[1][..300], even.channels[1][..]);
        assert_eq!(uneven.channels[1][300..], right[300..]);
    }

    #[test]
    fn empty_buffer_is_a_no_op() {
        let mut host = OfflineHost::new(ProcessorConfig::default()).unwrap();
        let mut audio = AudioBuffer::default();
        let mut called = false;
        host.process(&mut audio, |_, _| called = true);
        assert!(!called);
    }
}

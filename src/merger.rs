//! Merge groups of related spectra into consensus spectra.
//!
//! Two grouping strategies are offered by [`SpectraMerger`]:
//!
//! - [`SpectraMerger::merge_spectra_block_wise`] groups runs of consecutive
//!   scans of the same MS level, bounded by a scan count and a retention time span.
//! - [`SpectraMerger::merge_spectra_precursors`] groups MS2 scans whose
//!   precursors are close in both retention time and m/z using hierarchical
//!   clustering.
//!
//! Either way each group is replaced by one spectrum whose peaks are the
//! binned union of the group's peaks.
use std::collections::BTreeSet;

use log::{debug, info, log_enabled, warn, Level};
use thiserror::Error;

use crate::clustering::{
    connected_nodes, cut, newick_tree, ClusteringError, HierarchicalClusterer, Linkage,
    PrecursorPoint,
};
use crate::params::ParamDescribed;
use crate::peaks::PeakList;
use crate::spectrum::{Experiment, IonProperties, Spectrum, SpectrumLike};

mod binning;
mod blocks;
pub mod config;

pub use binning::consolidate_peaks;
pub use blocks::{MergeBlocks, MergeStats};
pub use config::MergerParams;

/// The ways configuring or running a [`SpectraMerger`] can fail
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MergeError {
    /// A configuration value was out of range, unparsable or had an unknown name
    #[error("Invalid value for parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },
    /// A configuration document could not be read
    #[error("Invalid configuration document: {0}")]
    InvalidConfiguration(String),
    /// A spectrum that must be merged by its precursor has none
    #[error("Spectrum #{index} ({id}) has no precursor information, unable to merge")]
    MissingInformation { index: usize, id: String },
    /// A caller-built block refers to a missing spectrum or claims one twice
    #[error("Invalid merge block: {0}")]
    InvalidBlock(String),
    /// The precursor clustering rejected its input
    #[error("Failed to cluster precursors: {0}")]
    ClusteringError(
        #[from]
        #[source]
        ClusteringError,
    ),
}

impl MergeError {
    fn missing_precursor(index: usize, spectrum: &Spectrum) -> Self {
        Self::MissingInformation {
            index,
            id: spectrum.id().to_string(),
        }
    }
}

/// Replaces groups of related spectra in an [`Experiment`] with consensus
/// spectra, according to a validated [`MergerParams`].
#[derive(Debug, Default, Clone)]
pub struct SpectraMerger {
    params: MergerParams,
}

impl SpectraMerger {
    pub fn new(params: MergerParams) -> Result<Self, MergeError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &MergerParams {
        &self.params
    }

    pub fn set_params(&mut self, params: MergerParams) -> Result<(), MergeError> {
        params.validate()?;
        self.params = params;
        Ok(())
    }

    /// Set one parameter by its `key = value` name, see [`config`]
    pub fn set_param(&mut self, name: &str, value: &str) -> Result<(), MergeError> {
        self.params.set_param(name, value)
    }

    /// Merge runs of consecutive spectra of each configured MS level.
    ///
    /// A block starts at the first unclaimed spectrum of a level and grows
    /// with the following spectra of that level until it holds
    /// `rt_block_size` spectra or the next spectrum is more than
    /// `rt_max_length` seconds after the block's first one. Spectra of
    /// other levels are skipped over and left as they are.
    ///
    /// For levels above 1, every spectrum of the level must have a
    /// precursor. This is checked before `experiment` is touched.
    pub fn merge_spectra_block_wise(
        &self,
        experiment: &mut Experiment,
    ) -> Result<MergeStats, MergeError> {
        for level in self.params.ms_levels.iter().copied().filter(|l| *l > 1) {
            if let Some((i, spectrum)) = experiment
                .iter()
                .enumerate()
                .find(|(_, s)| s.ms_level() == level && !s.has_precursor())
            {
                return Err(MergeError::missing_precursor(i, spectrum));
            }
        }

        let mut stats = MergeStats::default();
        for level in self.params.ms_levels.iter().copied() {
            let blocks = self.plan_blocks(experiment, level);
            debug!(
                "Planned {} blocks for {} MS{level} spectra",
                blocks.len(),
                blocks.indices().len()
            );
            stats.absorb(self.merge_blocks(experiment, &blocks, level)?);
        }
        experiment.sort_spectra();
        Ok(stats)
    }

    fn plan_blocks(&self, experiment: &Experiment, ms_level: u8) -> MergeBlocks {
        let rt_max_length = self.params.effective_rt_max_length();
        let mut blocks = MergeBlocks::new();
        let mut current: Option<(usize, f64, usize)> = None;

        for (i, spectrum) in experiment.iter().enumerate() {
            if spectrum.ms_level() != ms_level {
                continue;
            }
            let rt = spectrum.start_time();
            match current {
                Some((master, start, size))
                    if size < self.params.rt_block_size && rt - start <= rt_max_length =>
                {
                    blocks.push_member(master, i);
                    current = Some((master, start, size + 1));
                }
                _ => {
                    blocks.insert_master(i);
                    current = Some((i, rt, 1));
                }
            }
        }
        blocks
    }

    /// Merge MS2 spectra whose precursors are close in retention time and m/z.
    ///
    /// Every MS2 spectrum is placed at the retention time and m/z of its
    /// first precursor and the points are clustered with single linkage.
    /// Each cluster of two or more spectra becomes a block whose master is
    /// its earliest member in experiment order.
    pub fn merge_spectra_precursors(
        &self,
        experiment: &mut Experiment,
    ) -> Result<MergeStats, MergeError> {
        let mut points = Vec::new();
        let mut positions = Vec::new();
        for (i, spectrum) in experiment.iter().enumerate() {
            if spectrum.ms_level() != 2 {
                continue;
            }
            let Some(precursor) = spectrum.precursor() else {
                return Err(MergeError::missing_precursor(i, spectrum));
            };
            let n_precursors = spectrum.precursors().len();
            if n_precursors > 1 {
                warn!(
                    "Spectrum #{i} ({}) has {n_precursors} precursors, only the first is used",
                    spectrum.id()
                );
            }
            points.push(PrecursorPoint::new(spectrum.start_time(), precursor.mz()));
            positions.push(i);
        }

        if points.is_empty() {
            info!("No MS2 spectra to merge");
            experiment.sort_spectra();
            return Ok(MergeStats::default());
        }

        let clusterer = HierarchicalClusterer::new(Linkage::Single);
        let tree = clusterer.cluster(&points, &self.params.precursor)?;
        if log_enabled!(Level::Debug) {
            debug!("Precursor clustering: {}", newick_tree(points.len(), &tree, true));
        }

        let clusters = cut(points.len(), points.len() - connected_nodes(&tree), &tree)?;
        let mut blocks = MergeBlocks::new();
        for cluster in clusters.iter().filter(|c| c.len() > 1) {
            let master = positions[cluster[0]];
            blocks.insert_master(master);
            for member in cluster[1..].iter() {
                blocks.push_member(master, positions[*member]);
            }
        }

        let stats = self.merge_blocks(experiment, &blocks, 2)?;
        experiment.sort_spectra();
        Ok(stats)
    }

    /// Replace every block of `blocks` with one consensus spectrum of MS
    /// level `ms_level`.
    ///
    /// The consensus takes the master's identity and metadata, with the
    /// members' parameters layered on top in block order. Its retention time
    /// is the mean over the block, and for MS levels above 1 its precursor is
    /// the master's first precursor moved to the mean precursor m/z. Its peaks
    /// are all of the block's peaks, sorted and binned.
    ///
    /// Spectra outside of `blocks` are kept in their current order with the
    /// consensus spectra appended after them, so the experiment should be
    /// re-sorted afterwards. Nothing is modified if an error is returned.
    pub fn merge_blocks(
        &self,
        experiment: &mut Experiment,
        blocks: &MergeBlocks,
        ms_level: u8,
    ) -> Result<MergeStats, MergeError> {
        let mut claimed = BTreeSet::new();
        for (master, members) in blocks.iter() {
            for i in std::iter::once(master).chain(members.iter()) {
                if *i >= experiment.len() {
                    return Err(MergeError::InvalidBlock(format!(
                        "spectrum #{i} is out of bounds for {} spectra",
                        experiment.len()
                    )));
                }
                if !claimed.insert(*i) {
                    return Err(MergeError::InvalidBlock(format!(
                        "spectrum #{i} appears in more than one place"
                    )));
                }
            }
        }

        let mut stats = MergeStats::default();
        let mut consensus_spectra = Vec::with_capacity(blocks.len());
        for (master, members) in blocks.iter() {
            stats.record_block(members.len() + 1);
            if let Some(consensus) = self.build_consensus(experiment, *master, members, ms_level)? {
                consensus_spectra.push(consensus);
            } else {
                stats.skipped_blocks += 1;
            }
        }
        stats.consensus_count = consensus_spectra.len();

        if !stats.cluster_sizes.is_empty() {
            info!("Cluster sizes:");
            for (size, count) in stats.cluster_sizes.iter() {
                info!("  size {size}: {count}x");
            }
        }

        let mut kept: Vec<Spectrum> = experiment
            .take_spectra()
            .into_iter()
            .enumerate()
            .filter_map(|(i, s)| (!claimed.contains(&i)).then_some(s))
            .collect();
        kept.extend(consensus_spectra);
        experiment.replace_spectra(kept);
        Ok(stats)
    }

    fn build_consensus(
        &self,
        experiment: &Experiment,
        master: usize,
        members: &[usize],
        ms_level: u8,
    ) -> Result<Option<Spectrum>, MergeError> {
        let block: Vec<(usize, &Spectrum)> = std::iter::once(master)
            .chain(members.iter().copied())
            .map(|i| (i, &experiment[i]))
            .collect();
        let master_spectrum = block[0].1;
        let n = block.len() as f64;

        let mut peaks = PeakList::with_capacity(block.iter().map(|(_, s)| s.len()).sum());
        let mut rt_sum = 0.0;
        let mut mz_sum = 0.0;
        for (i, spectrum) in block.iter() {
            peaks.extend_from_peaks(&spectrum.peaks);
            rt_sum += spectrum.start_time();
            if ms_level > 1 {
                let precursor = spectrum
                    .precursor()
                    .ok_or_else(|| MergeError::missing_precursor(*i, spectrum))?;
                mz_sum += precursor.mz();
            }
        }

        if peaks.is_empty() {
            warn!(
                "Block of {} spectra led by #{master} ({}) has no peaks, no consensus is produced",
                block.len(),
                master_spectrum.id()
            );
            return Ok(None);
        }

        let mut consensus = Spectrum::new(master_spectrum.description.clone(), PeakList::empty());
        for (_, spectrum) in block.iter().skip(1) {
            consensus.unify(spectrum);
        }
        consensus.set_ms_level(ms_level);
        consensus.set_start_time(rt_sum / n);

        if ms_level > 1 {
            let extra = master_spectrum.precursors().len().saturating_sub(1);
            if extra > 0 {
                warn!(
                    "Dropping {extra} additional precursors of spectrum #{master} ({})",
                    master_spectrum.id()
                );
            }
            if let Some(mut precursor) = master_spectrum.precursor().cloned() {
                precursor.set_mz(mz_sum / n);
                consensus.set_precursors(vec![precursor]);
            }
        } else {
            consensus.set_precursors(Vec::new());
        }

        peaks.sort_by_position();
        consensus.peaks = consolidate_peaks(
            &peaks,
            self.params.mz_binning_width,
            self.params.mz_binning_width_unit,
        );
        Ok(Some(consensus))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mass_error::MassErrorType;
    use crate::params::Param;
    use crate::spectrum::Precursor;

    fn scan(ms_level: u8, rt: f64, peaks: &[(f64, f32)]) -> Spectrum {
        Spectrum::at(ms_level, rt)
            .with_id(format!("scan={rt}"), 0)
            .with_peaks(PeakList::from_pairs(peaks.iter().copied()))
    }

    fn ms2(rt: f64, precursor_mz: f64, peaks: &[(f64, f32)]) -> Spectrum {
        scan(2, rt, peaks).with_precursor(Precursor::new(precursor_mz))
    }

    fn da_merger(width: f64) -> SpectraMerger {
        let mut merger = SpectraMerger::default();
        merger.set_param(config::MZ_BINNING_WIDTH_UNIT, "Da").unwrap();
        merger.set_param(config::MZ_BINNING_WIDTH, &width.to_string()).unwrap();
        merger
    }

    fn peak_pairs(spectrum: &Spectrum) -> Vec<(f64, f32)> {
        spectrum.peaks.iter().map(|p| (p.mz, p.intensity)).collect()
    }

    #[test_log::test]
    fn test_block_wise_ms2() {
        let mut merger = da_merger(0.01);
        merger.set_param(config::MS_LEVELS, "2").unwrap();
        merger.set_param(config::RT_BLOCK_SIZE, "2").unwrap();

        let mut exp = Experiment::from(vec![
            scan(1, 0.0, &[(50.0, 1.0)]),
            ms2(0.0, 300.0, &[(100.0, 1.0)]),
            ms2(1.0, 302.0, &[(100.0, 2.0)]),
            ms2(2.0, 400.0, &[(200.0, 1.0)]),
            ms2(3.0, 400.0, &[(200.0, 2.0)]),
        ]);
        let stats = merger.merge_spectra_block_wise(&mut exp).unwrap();
        assert_eq!(stats.cluster_sizes.get(&2), Some(&2));
        assert_eq!(stats.consensus_count, 2);

        assert_eq!(exp.len(), 3);
        assert!(exp.is_sorted());
        assert_eq!(exp[0].ms_level(), 1);
        assert_eq!(peak_pairs(&exp[0]), [(50.0, 1.0)]);

        assert_eq!(exp[1].start_time(), 0.5);
        assert_eq!(peak_pairs(&exp[1]), [(100.0, 3.0)]);
        assert_eq!(exp[1].precursor().unwrap().mz(), 301.0);
        assert_eq!(exp[1].id(), "scan=0");

        assert_eq!(exp[2].start_time(), 2.5);
        assert_eq!(peak_pairs(&exp[2]), [(200.0, 3.0)]);
        assert_eq!(exp[2].precursors().len(), 1);
    }

    #[test]
    fn test_single_master_block_ppm() {
        let mut merger = SpectraMerger::default();
        merger.set_param(config::MZ_BINNING_WIDTH, "10").unwrap();
        let mut exp = Experiment::from(vec![scan(
            1,
            12.0,
            &[(500.0, 1.0), (500.0025, 1.0), (500.01, 1.0)],
        )]);
        let stats = merger.merge_spectra_block_wise(&mut exp).unwrap();
        assert_eq!(stats.cluster_sizes.get(&1), Some(&1));
        assert_eq!(exp.len(), 1);
        assert_eq!(exp[0].start_time(), 12.0);
        assert_eq!(peak_pairs(&exp[0]), [(500.0, 2.0), (500.01, 1.0)]);
    }

    #[test]
    fn test_rt_max_length_splits_blocks() {
        let mut merger = da_merger(0.01);
        merger.set_param(config::RT_MAX_LENGTH, "5").unwrap();
        let exp = Experiment::from(vec![
            scan(1, 0.0, &[(100.0, 1.0)]),
            scan(2, 0.5, &[(100.0, 1.0)]).with_precursor(Precursor::new(400.0)),
            scan(1, 1.0, &[(100.0, 1.0)]),
            scan(1, 10.0, &[(100.0, 1.0)]),
            scan(1, 11.0, &[(100.0, 1.0)]),
            scan(1, 12.0, &[(100.0, 1.0)]),
        ]);
        let blocks = merger.plan_blocks(&exp, 1);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks.get(0), Some([2].as_slice()));
        assert_eq!(blocks.get(3), Some([4, 5].as_slice()));

        merger.set_param(config::RT_BLOCK_SIZE, "2").unwrap();
        let blocks = merger.plan_blocks(&exp, 1);
        let masters: Vec<usize> = blocks.iter().map(|(m, _)| *m).collect();
        assert_eq!(masters, [0, 3, 5]);
        assert_eq!(blocks.get(5).map(|m| m.len()), Some(0));
    }

    #[test_log::test]
    fn test_precursor_clustering() {
        let merger = da_merger(0.01);
        let mut exp = Experiment::from(vec![
            ms2(0.0, 400.0, &[(150.0, 1.0), (250.0, 1.0)]),
            ms2(5.0, 400.5, &[(150.0, 2.0)]),
            ms2(100.0, 600.0, &[(170.0, 1.0)]),
            ms2(200.0, 600.4, &[(180.0, 1.0)]),
            ms2(250.0, 800.0, &[(190.0, 1.0)]),
        ]);
        let stats = merger.merge_spectra_precursors(&mut exp).unwrap();
        assert_eq!(stats.consensus_count, 1);
        assert_eq!(stats.merged_count, 2);

        assert_eq!(exp.len(), 4);
        let times: Vec<f64> = exp.iter().map(|s| s.start_time()).collect();
        assert_eq!(times, [2.5, 100.0, 200.0, 250.0]);
        assert_eq!(exp[0].precursor().unwrap().mz(), 400.25);
        assert_eq!(peak_pairs(&exp[0]), [(150.0, 3.0), (250.0, 1.0)]);
        assert_eq!(peak_pairs(&exp[2]), [(180.0, 1.0)]);
    }

    #[test]
    fn test_precursor_merge_keeps_charge() {
        let merger = SpectraMerger::default();
        let mut exp = Experiment::from(vec![
            scan(2, 10.0, &[(300.0, 1.0)])
                .with_precursor(Precursor::new(500.0).with_charge(2))
                .with_precursor(Precursor::new(700.0)),
            ms2(11.0, 500.2, &[(301.0, 1.0)]),
        ]);
        merger.merge_spectra_precursors(&mut exp).unwrap();
        assert_eq!(exp.len(), 1);
        let precursor = exp[0].precursor().unwrap();
        assert_eq!(precursor.charge(), Some(2));
        assert!((precursor.mz() - 500.1).abs() < 1e-9);
        assert_eq!(exp[0].precursors().len(), 1);
        assert_eq!(exp[0].start_time(), 10.5);
    }

    #[test]
    fn test_missing_precursor() {
        let mut merger = SpectraMerger::default();
        merger.set_param(config::MS_LEVELS, "1,2").unwrap();
        let original = vec![
            scan(1, 0.0, &[(100.0, 1.0)]),
            scan(1, 1.0, &[(100.0, 1.0)]),
            ms2(2.0, 400.0, &[(150.0, 1.0)]),
            scan(2, 3.0, &[(150.0, 1.0)]).with_id("bad", 3),
        ];
        let mut exp = Experiment::from(original.clone());

        let err = merger.merge_spectra_block_wise(&mut exp).unwrap_err();
        assert_eq!(
            err,
            MergeError::MissingInformation {
                index: 3,
                id: "bad".to_string()
            }
        );
        assert_eq!(exp.len(), original.len());
        assert_eq!(peak_pairs(&exp[1]), peak_pairs(&original[1]));

        let err = merger.merge_spectra_precursors(&mut exp).unwrap_err();
        assert!(matches!(err, MergeError::MissingInformation { index: 3, .. }));
        assert_eq!(exp.len(), original.len());
    }

    #[test]
    fn test_no_ms2_spectra() {
        let merger = SpectraMerger::default();
        let mut exp = Experiment::from(vec![
            scan(1, 3.0, &[(100.0, 1.0)]),
            scan(1, 1.0, &[(100.0, 1.0)]),
        ]);
        let stats = merger.merge_spectra_precursors(&mut exp).unwrap();
        assert_eq!(stats, MergeStats::default());
        assert_eq!(exp.len(), 2);
        assert!(exp.is_sorted());

        let mut empty = Experiment::default();
        assert_eq!(
            merger.merge_spectra_block_wise(&mut empty).unwrap(),
            MergeStats::default()
        );
    }

    #[test]
    fn test_empty_block_is_skipped() {
        let merger = SpectraMerger::default();
        let mut exp = Experiment::from(vec![
            scan(1, 0.0, &[]),
            scan(1, 1.0, &[]),
            scan(2, 1.5, &[(100.0, 1.0)]),
        ]);
        let stats = merger.merge_spectra_block_wise(&mut exp).unwrap();
        assert_eq!(stats.skipped_blocks, 1);
        assert_eq!(stats.consensus_count, 0);
        assert_eq!(exp.len(), 1);
        assert_eq!(exp[0].ms_level(), 2);
    }

    #[test]
    fn test_intensity_is_conserved() {
        let merger = SpectraMerger::default();
        let mut exp: Experiment = (0..23)
            .map(|i| {
                let peaks: Vec<(f64, f32)> = (0..15)
                    .map(|j| (100.0 + ((i * 31 + j * 17) % 200) as f64 * 0.37, 1.0 + j as f32))
                    .collect();
                scan(1, i as f64 * 0.8, &peaks)
            })
            .collect();
        let before: f32 = exp.iter().map(|s| s.peaks.tic()).sum();
        let stats = merger.merge_spectra_block_wise(&mut exp).unwrap();
        let after: f32 = exp.iter().map(|s| s.peaks.tic()).sum();

        assert_eq!(stats.merged_count, 23);
        assert_eq!(exp.len(), 5);
        assert!((before - after).abs() < 1e-3 * before);
        for spectrum in exp.iter() {
            assert!(spectrum.peaks.is_sorted());
            let widths = spectrum
                .peaks
                .as_slice()
                .windows(2)
                .map(|w| MassErrorType::PPM.distance(w[0].mz, w[1].mz));
            for d in widths {
                assert!(d >= 5.0, "{d}");
            }
        }
    }

    #[test]
    fn test_block_size_one_is_identity() {
        let mut merger = da_merger(0.0);
        merger.set_param(config::RT_BLOCK_SIZE, "1").unwrap();
        let original: Vec<Spectrum> = (0..4)
            .map(|i| scan(1, i as f64, &[(100.0 + i as f64, 1.0), (50.0, 2.0), (50.0, 3.0)]))
            .collect();
        let mut exp = Experiment::from(original.clone());
        merger.merge_spectra_block_wise(&mut exp).unwrap();
        assert_eq!(exp.len(), original.len());
        for (merged, source) in exp.iter().zip(original.iter()) {
            let mut expected = source.peaks.clone();
            expected.sort_by_position();
            let expected: Vec<(f64, f32)> =
                expected.iter().map(|p| (p.mz, p.intensity)).collect();
            assert_eq!(peak_pairs(merged), expected);
            assert_eq!(merged.start_time(), source.start_time());
        }
    }

    #[test]
    fn test_params_are_unified() {
        let merger = SpectraMerger::default();
        let mut first = scan(1, 0.0, &[(100.0, 1.0)]);
        first.add_param(Param::new_key_value("filter", "a"));
        first.add_param(Param::new_key_value("polarity", "+"));
        let mut second = scan(1, 1.0, &[(100.0, 1.0)]);
        second.add_param(Param::new_key_value("filter", "b"));
        second.add_param(Param::new_key_value("lens", "3"));

        let mut exp = Experiment::from(vec![first, second]);
        merger.merge_spectra_block_wise(&mut exp).unwrap();
        assert_eq!(exp.len(), 1);
        let consensus = &exp[0];
        assert_eq!(consensus.get_param_by_name("filter").unwrap().value, "b");
        assert_eq!(consensus.get_param_by_name("polarity").unwrap().value, "+");
        assert_eq!(consensus.get_param_by_name("lens").unwrap().value, "3");
    }

    #[test]
    fn test_invalid_blocks() {
        let merger = SpectraMerger::default();
        let mut exp = Experiment::from(vec![scan(1, 0.0, &[(100.0, 1.0)]), scan(1, 1.0, &[])]);

        let mut blocks = MergeBlocks::new();
        blocks.push_member(0, 5);
        let err = merger.merge_blocks(&mut exp, &blocks, 1).unwrap_err();
        assert!(matches!(err, MergeError::InvalidBlock(_)));

        let mut blocks = MergeBlocks::new();
        blocks.push_member(0, 1);
        blocks.push_member(1, 0);
        let err = merger.merge_blocks(&mut exp, &blocks, 1).unwrap_err();
        assert!(matches!(err, MergeError::InvalidBlock(_)));
        assert_eq!(exp.len(), 2);
    }

    #[test]
    fn test_error_messages() {
        let err = MergeError::MissingInformation {
            index: 4,
            id: "scan=12".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Spectrum #4 (scan=12) has no precursor information, unable to merge"
        );
        let err = MergeError::InvalidParameter {
            name: config::RT_BLOCK_SIZE.to_string(),
            reason: "must be a positive integer".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for parameter block_method:rt_block_size: must be a positive integer"
        );
        let err: MergeError = ClusteringError::InvalidInput("no points".to_string()).into();
        assert_eq!(
            err.to_string(),
            "Failed to cluster precursors: Invalid clustering input: no points"
        );
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_constructor_validates() {
        let params = MergerParams {
            rt_block_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            SpectraMerger::new(params),
            Err(MergeError::InvalidParameter { .. })
        ));
        let mut merger = SpectraMerger::default();
        assert!(merger
            .set_params(MergerParams {
                ms_levels: Vec::new(),
                ..Default::default()
            })
            .is_err());
        assert_eq!(merger.params(), &MergerParams::default());
    }
}

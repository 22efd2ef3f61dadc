use std::collections::{HashMap, HashSet};

use ndarray::Array1;
use rand::{seq::SliceRandom, Rng};
use tracing::debug;

use super::{LabeledRecords, Labels, RecordSet};
use crate::error::{DataIntegrityError, Error, Result};

impl Labels {
    /// Create labels for the named target
    ///
    /// Every value has to be 0 or 1 and every respondent may only be labeled once.
    pub fn new<S: ToString, T: ToString>(target: T, pairs: Vec<(S, usize)>) -> Result<Labels> {
        let mut ids = Vec::with_capacity(pairs.len());
        let mut values = Vec::with_capacity(pairs.len());
        let mut seen = HashSet::with_capacity(pairs.len());

        for (id, value) in pairs {
            let id = id.to_string();
            if value > 1 {
                return Err(DataIntegrityError::InvalidLabel {
                    id,
                    value: value.to_string(),
                }
                .into());
            }
            if !seen.insert(id.clone()) {
                return Err(DataIntegrityError::DuplicateIdentifier(id).into());
            }
            ids.push(id);
            values.push(value);
        }

        Ok(Labels {
            target: target.to_string(),
            ids,
            values,
        })
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate over `(respondent, label)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.ids
            .iter()
            .map(|id| id.as_str())
            .zip(self.values.iter().copied())
    }
}

impl LabeledRecords {
    /// Join records with their labels by respondent identifier
    ///
    /// The join has to be one-to-one: a record without a label or a label without a record is
    /// an integrity error. Targets follow the row order of `records`.
    pub fn join(records: RecordSet, labels: Labels) -> Result<LabeledRecords> {
        let by_id: HashMap<&str, usize> = labels.iter().collect();

        let mut targets = Vec::with_capacity(records.nsamples());
        for id in records.ids() {
            match by_id.get(id.as_str()) {
                Some(&label) => targets.push(label),
                None => return Err(DataIntegrityError::MissingLabel(id.clone()).into()),
            }
        }

        if labels.len() != records.nsamples() {
            let known: HashSet<&str> = records.ids().iter().map(|id| id.as_str()).collect();
            if let Some((id, _)) = labels.iter().find(|(id, _)| !known.contains(id)) {
                return Err(DataIntegrityError::UnmatchedLabel(id.to_string()).into());
            }
        }

        debug!(
            nsamples = records.nsamples(),
            label = %labels.target,
            "joined records with labels"
        );

        Ok(LabeledRecords {
            records,
            targets: Array1::from(targets),
            target_name: labels.target,
        })
    }

    pub fn records(&self) -> &RecordSet {
        &self.records
    }

    pub fn targets(&self) -> &Array1<usize> {
        &self.targets
    }

    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    pub fn nsamples(&self) -> usize {
        self.records.nsamples()
    }

    /// Copies the respondents at `indices` together with their labels
    pub fn select(&self, indices: &[usize]) -> LabeledRecords {
        LabeledRecords {
            records: self.records.select(indices),
            targets: indices.iter().map(|&i| self.targets[i]).collect(),
            target_name: self.target_name.clone(),
        }
    }

    /// Return a shuffled copy
    pub fn shuffle<R: Rng>(&self, rng: &mut R) -> LabeledRecords {
        let mut indices = (0..self.nsamples()).collect::<Vec<_>>();
        indices.shuffle(rng);

        self.select(&indices)
    }

    /// Split into a training and a validation part
    ///
    /// The training part holds the first `ceil(nsamples * ratio)` respondents, the validation part
    /// the rest. Both are copies.
    pub fn split_with_ratio(&self, ratio: f32) -> (LabeledRecords, LabeledRecords) {
        let n = ((self.nsamples() as f32 * ratio).ceil() as usize).min(self.nsamples());
        let indices = (0..self.nsamples()).collect::<Vec<_>>();
        let (first, second) = indices.split_at(n);
        debug!(
            ratio,
            train = first.len(),
            valid = second.len(),
            "split respondents"
        );

        (self.select(first), self.select(second))
    }

    /// Performs k-folding
    ///
    /// The respondents are cut into `k` consecutive chunks. The i-th pair holds every chunk but
    /// the i-th as training part and the i-th chunk as validation part, so each respondent is
    /// validated exactly once. Shuffle beforehand for randomized folds.
    ///
    /// Fails if `k` is smaller than two or larger than the number of respondents.
    pub fn fold(&self, k: usize) -> Result<Vec<(LabeledRecords, LabeledRecords)>> {
        let n = self.nsamples();
        if k < 2 || k > n {
            return Err(Error::Parameters(format!(
                "number of folds must lie in 2..={}, got {}",
                n, k
            )));
        }

        let (base, remainder) = (n / k, n % k);
        let mut folds = Vec::with_capacity(k);
        let mut start = 0;
        for i in 0..k {
            let end = start + base + usize::from(i < remainder);
            let train = (0..start).chain(end..n).collect::<Vec<_>>();
            let valid = (start..end).collect::<Vec<_>>();
            debug!(fold = i, valid_start = start, valid_end = end, "prepared fold");
            folds.push((self.select(&train), self.select(&valid)));
            start = end;
        }

        Ok(folds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Column, SEASONAL_TARGET};
    use rand::{rngs::SmallRng, SeedableRng};

    fn records(n: usize) -> RecordSet {
        RecordSet::new((0..n).map(|x| x.to_string()).collect::<Vec<_>>())
            .unwrap()
            .with_column("household_adults", Column::count((0..n).map(|x| Some(x as u32))))
            .unwrap()
    }

    fn labels(n: usize) -> Labels {
        Labels::new(SEASONAL_TARGET, (0..n).map(|x| (x, x % 2)).collect::<Vec<_>>()).unwrap()
    }

    #[test]
    fn labels_reject_values_outside_binary() {
        let res = Labels::new("seasonal_vaccine", vec![("1", 0), ("2", 2)]);
        assert_eq!(
            res,
            Err(Error::DataIntegrity(DataIntegrityError::InvalidLabel {
                id: "2".into(),
                value: "2".into()
            }))
        );
    }

    #[test]
    fn labels_reject_duplicate_identifiers() {
        let res = Labels::new("seasonal_vaccine", vec![("1", 0), ("1", 1)]);
        assert_eq!(
            res,
            Err(Error::DataIntegrity(DataIntegrityError::DuplicateIdentifier(
                "1".into()
            )))
        );
    }

    #[test]
    fn join_follows_record_order() {
        let labels = Labels::new("seasonal_vaccine", vec![("2", 1), ("0", 0), ("1", 1)]).unwrap();
        let joined = LabeledRecords::join(records(3), labels).unwrap();

        assert_eq!(joined.targets(), &Array1::from(vec![0, 1, 1]));
        assert_eq!(joined.target_name(), "seasonal_vaccine");
    }

    #[test]
    fn join_is_one_to_one() {
        let labels = Labels::new("seasonal_vaccine", vec![("0", 0), ("1", 1)]).unwrap();
        assert_eq!(
            LabeledRecords::join(records(3), labels),
            Err(Error::DataIntegrity(DataIntegrityError::MissingLabel(
                "2".into()
            )))
        );

        let labels =
            Labels::new("seasonal_vaccine", vec![("0", 0), ("1", 1), ("2", 0), ("7", 1)]).unwrap();
        assert_eq!(
            LabeledRecords::join(records(3), labels),
            Err(Error::DataIntegrity(DataIntegrityError::UnmatchedLabel(
                "7".into()
            )))
        );
    }

    #[test]
    fn split_with_ratio_rounds_up() {
        let data = LabeledRecords::join(records(50), labels(50)).unwrap();
        let (train, valid) = data.split_with_ratio(0.25);

        assert_eq!(train.nsamples(), 13);
        assert_eq!(valid.nsamples(), 37);
        assert_eq!(train.targets().len(), 13);
        assert_eq!(data.nsamples(), 50);
    }

    #[test]
    fn k_fold_validates_each_record_once() {
        let data = LabeledRecords::join(records(7), labels(7)).unwrap();
        let folds = data.fold(3).unwrap();
        assert_eq!(folds.len(), 3);

        let mut validated = Vec::new();
        for (train, valid) in &folds {
            assert_eq!(train.nsamples() + valid.nsamples(), 7);
            for id in valid.records().ids() {
                assert!(!train.records().ids().contains(id));
            }
            validated.extend(valid.records().ids().iter().cloned());
        }
        assert_eq!(
            validated,
            (0..7).map(|x| x.to_string()).collect::<Vec<_>>()
        );
        assert_eq!(folds[0].1.nsamples(), 3);
        assert_eq!(folds[2].1.nsamples(), 2);
    }

    #[test]
    fn k_fold_rejects_invalid_k() {
        let data = LabeledRecords::join(records(3), labels(3)).unwrap();
        assert!(matches!(data.fold(1), Err(Error::Parameters(_))));
        assert!(matches!(data.fold(4), Err(Error::Parameters(_))));
    }

    #[test]
    fn shuffle_keeps_labels_attached() {
        let mut rng = SmallRng::seed_from_u64(42);
        let data = LabeledRecords::join(records(20), labels(20)).unwrap();
        let shuffled = data.shuffle(&mut rng);

        assert_eq!(shuffled.nsamples(), 20);
        for (id, target) in shuffled.records().ids().iter().zip(shuffled.targets()) {
            let id: usize = id.parse().unwrap();
            assert_eq!(*target, id % 2);
        }
    }
}

use flushot::traits::{Fit, Transformer};
use flushot_preprocessing::{FeaturePreprocessor, PreprocessingError, UnknownCategory};
use rand::{rngs::SmallRng, SeedableRng};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flushot=info".into()),
        )
        .init();

    // Read in the bundled sample and shuffle the respondents
    let mut rng = SmallRng::seed_from_u64(42);
    let data = flushot_datasets::sample()?.shuffle(&mut rng);
    let (train, valid) = data.split_with_ratio(0.8);

    // Learn fill values and vocabularies from the training split only
    let preprocessor = FeaturePreprocessor::<f64>::params().fit(&train)?;
    let train_set = preprocessor.transform(&train)?;
    let valid_set = preprocessor.transform(&valid)?;
    println!(
        "Encoded {} training and {} validation respondents into {} features",
        train_set.nsamples(),
        valid_set.nsamples(),
        preprocessor.nfeatures()
    );

    // Every fold gets its own preprocessor, fitted on the training part of the fold
    let folds = FeaturePreprocessor::<f64>::params()
        .unknown_category(UnknownCategory::Bucket)
        .fit_transform_folds(&data, 5)?;
    for (i, (train, valid)) in folds.iter().enumerate() {
        println!(
            "fold {}: train {:?}, valid {:?}",
            i,
            train.records().dim(),
            valid.records().dim()
        );
    }

    // A strict preprocessor rejects categories it has never seen
    let strict = FeaturePreprocessor::<f64>::params()
        .unknown_category(UnknownCategory::Error)
        .fit(&train)?;
    match strict.transform(valid.records()) {
        Ok(records) => println!("strict encoding of the validation split: {:?}", records.dim()),
        Err(PreprocessingError::Schema(err)) => println!("rejected: {}", err),
        Err(err) => return Err(err.into()),
    }

    Ok(())
}

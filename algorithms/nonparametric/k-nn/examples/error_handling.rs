//! Example demonstrating error handling with the k-NN classifier.
//!
//! Every precondition violation comes back as a `KnnError` value instead of a
//! panic, so callers can match on it or propagate it with `?`.

use k_nn::{KnnClassifier, KnnError, predict};
use pokeclass_helpers::Category::{Pichu, Pikachu};
use pokeclass_helpers::{L2Dist, Sample};

fn main() {
    println!("k-NN Classifier Error Handling Examples");
    println!("=======================================");

    let reference = vec![
        Sample::labeled(24.0, 30.0, Pikachu),
        Sample::labeled(26.0, 31.0, Pikachu),
        Sample::labeled(10.0, 12.0, Pichu),
        Sample::labeled(11.0, 10.0, Pichu),
    ];

    // Example 1: Handle invalid k value
    println!("\n1. Handling invalid k value (k=0):");
    match KnnClassifier::new(0, &reference, L2Dist) {
        Ok(_) => println!("   Classifier created successfully"),
        Err(e @ KnnError::InvalidK { .. }) => println!("   ✓ Caught expected error: {}", e),
        Err(e) => println!("   ✗ Unexpected error: {}", e),
    }

    // Example 2: Handle empty reference set
    println!("\n2. Handling empty reference set:");
    let empty: Vec<Sample> = vec![];
    match predict(&empty, &Sample::new(1.0, 1.0, None), 1) {
        Ok(label) => println!("   Predicted label: {}", label),
        Err(KnnError::EmptyReference) => {
            println!("   ✓ Caught expected error: {}", KnnError::EmptyReference)
        }
        Err(e) => println!("   ✗ Unexpected error: {}", e),
    }

    // Example 3: k larger than the reference set
    println!("\n3. Handling k larger than the reference set:");
    match predict(&reference, &Sample::new(1.0, 1.0, None), 10) {
        Ok(label) => println!("   Predicted label: {}", label),
        Err(e @ KnnError::KTooLarge { .. }) => println!("   ✓ Caught expected error: {}", e),
        Err(e) => println!("   ✗ Unexpected error: {}", e),
    }

    // Example 4: Unlabeled sample in the reference set
    println!("\n4. Handling an unlabeled reference sample:");
    let mut mixed = reference.clone();
    mixed.push(Sample::new(5.0, 5.0, None));
    match KnnClassifier::new(1, &mixed, L2Dist) {
        Ok(_) => println!("   Classifier created successfully"),
        Err(e) => println!("   ✓ Caught expected error: {}", e),
    }

    // Example 5: Error propagation in a function
    println!("\n5. Error propagation in functions:");

    fn classify_with_error_handling(reference: &[Sample]) -> Result<String, KnnError> {
        let classifier = KnnClassifier::new(3, reference, L2Dist)?;
        let result = classifier.predict(&Sample::new(25.0, 32.0, None))?;
        Ok(result.to_string())
    }

    match classify_with_error_handling(&reference) {
        Ok(result) => println!("   ✓ Classification result: {}", result),
        Err(e) => println!("   ✗ Classification failed: {}", e),
    }

    println!("\nAll examples completed successfully!");
}

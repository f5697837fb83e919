use matops::{Inputs, Matrix, OperationName, Outcome, Scheduler, Settings, Snapshot};
use pretty_assertions::assert_eq;

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

const PATIENCE: Duration = Duration::from_secs(30);

fn settings(debounce_ms: u64) -> Settings {
    Settings { debounce_ms, threads: Some(3), ..Settings::default() }
}

fn names(snapshot: &Snapshot) -> Vec<OperationName> {
    snapshot.entries.keys().cloned().collect()
}

#[test]
fn small_square_gets_seven_operations() {
    use matops::OperationName::*;

    let scheduler = Scheduler::new(&settings(20)).unwrap();
    scheduler.edit(Inputs::new(Matrix::from_rows(vec![vec![4.0, 1.0], vec![2.0, 3.0]]).unwrap()));
    let snapshot = scheduler.wait_until_settled(PATIENCE).unwrap();

    assert_eq!(
        names(&snapshot),
        vec![Determinant, Inverse, Eigenvalues, Transpose, Trace, Rank, ScalarMultiply],
    );
    assert!(snapshot.is_complete());
    assert_eq!(snapshot.outcome(Determinant), Some(&Outcome::Scalar(10.0)));
    assert_eq!(snapshot.outcome(Eigenvalues), Some(&Outcome::Vector(vec![5.0, 2.0])));
    assert_eq!(
        snapshot.outcome(ScalarMultiply),
        Some(&Outcome::Matrix(Matrix::from_rows(vec![vec![8.0, 2.0], vec![4.0, 6.0]]).unwrap())),
    );
}

#[test]
fn shape_decides_the_operations() {
    use matops::OperationName::*;

    let scheduler = Scheduler::new(&settings(20)).unwrap();

    scheduler.submit_now(Inputs::new(Matrix::zeros((2, 3))));
    let wide = scheduler.wait_until_settled(PATIENCE).unwrap();
    assert_eq!(names(&wide), vec![Transpose, Rank, ScalarMultiply]);

    scheduler.submit_now(Inputs::new(Matrix::identity(4)));
    let four = scheduler.wait_until_settled(PATIENCE).unwrap();
    assert_eq!(names(&four), vec![Determinant, Inverse, Transpose, Trace, Rank, ScalarMultiply]);

    scheduler.submit_now(Inputs::new(Matrix::identity(5)).with_rhs(Matrix::identity(5)));
    let five = scheduler.wait_until_settled(PATIENCE).unwrap();
    assert_eq!(names(&five), vec![Transpose, Trace, Rank, ScalarMultiply, Add, Subtract, Multiply]);
    assert_eq!(five.outcome(Multiply), Some(&Outcome::Matrix(Matrix::identity(5))));
}

#[test]
fn last_edit_wins() {
    let seen = Arc::new(Mutex::new(vec![]));
    let scheduler = Scheduler::with_listener(&settings(150), {
        let seen = Arc::clone(&seen);
        move |snapshot: &Snapshot| seen.lock().unwrap().push(snapshot.clone())
    }).unwrap();

    // typing "1", "12", "123" in quick succession
    for x in &[1.0, 12.0, 123.0] {
        scheduler.edit(Inputs::new(Matrix::from_rows(vec![vec![*x]]).unwrap()));
        thread::sleep(Duration::from_millis(10));
    }
    let snapshot = scheduler.wait_until_settled(PATIENCE).unwrap();
    assert_eq!(snapshot.outcome(OperationName::Trace), Some(&Outcome::Scalar(123.0)));

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0], snapshot);
}

#[test]
fn edits_after_settling_start_a_new_batch() {
    let scheduler = Scheduler::new(&settings(20)).unwrap();
    scheduler.edit(Inputs::new(Matrix::identity(2)));
    let first = scheduler.wait_until_settled(PATIENCE).unwrap();

    scheduler.edit(Inputs::new(Matrix::identity(2)).with_scalar(-1.0));
    let second = scheduler.wait_until_settled(PATIENCE).unwrap();

    assert_eq!(second.generation, first.generation + 1);
    assert_eq!(
        second.outcome(OperationName::ScalarMultiply),
        Some(&Outcome::Matrix(Matrix::identity(2).map(|x| -x))),
    );
}

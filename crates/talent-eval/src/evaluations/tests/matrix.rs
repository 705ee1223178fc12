use super::common::*;
use crate::evaluations::domain::{PerformanceLevel, PotentialRating};
use crate::evaluations::matrix::{build_talent_matrix, TalentBox};

#[test]
fn place_covers_every_cell_of_the_grid() {
    assert_eq!(
        TalentBox::place(PerformanceLevel::High, PotentialRating::High),
        Some(TalentBox::Star)
    );
    assert_eq!(
        TalentBox::place(PerformanceLevel::Low, PotentialRating::High),
        Some(TalentBox::RoughDiamond)
    );
    assert_eq!(
        TalentBox::place(PerformanceLevel::Medium, PotentialRating::Medium),
        Some(TalentBox::CorePlayer)
    );
    assert_eq!(
        TalentBox::place(PerformanceLevel::Low, PotentialRating::Low),
        Some(TalentBox::Underperformer)
    );
    assert_eq!(
        TalentBox::place(PerformanceLevel::Indeterminate, PotentialRating::High),
        None
    );
}

#[test]
fn matrix_places_latest_evaluations() {
    let employees = vec![
        employee("emp-1", "Ana Torres", "Engineering"),
        employee("emp-2", "Bruno Díaz", "Engineering"),
        employee("emp-3", "Carla Ruiz", "Sales"),
        employee("emp-4", "Diego Paz", "Sales"),
    ];
    let evaluations = vec![
        evaluation_record(
            "eval-000001",
            "emp-1",
            date(2024, 6, 30),
            5.0,
            PerformanceLevel::Medium,
            PotentialRating::Low,
        ),
        evaluation_record(
            "eval-000002",
            "emp-1",
            date(2025, 6, 30),
            9.0,
            PerformanceLevel::High,
            PotentialRating::High,
        ),
        evaluation_record(
            "eval-000003",
            "emp-2",
            date(2025, 6, 30),
            9.5,
            PerformanceLevel::High,
            PotentialRating::High,
        ),
        evaluation_record(
            "eval-000004",
            "emp-3",
            date(2025, 6, 30),
            3.0,
            PerformanceLevel::Low,
            PotentialRating::Medium,
        ),
        evaluation_record(
            "eval-000005",
            "emp-4",
            date(2025, 6, 30),
            12.0,
            PerformanceLevel::Indeterminate,
            PotentialRating::Medium,
        ),
    ];

    let matrix = build_talent_matrix(&employees, &evaluations, None);

    assert_eq!(matrix.cells.len(), 9);
    assert_eq!(matrix.cells[0].category, TalentBox::Star);
    assert_eq!(matrix.cells[8].category, TalentBox::Underperformer);
    assert_eq!(matrix.placed(), 3);

    let stars = matrix.cell(TalentBox::Star).expect("star cell");
    let names: Vec<&str> = stars.employees.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Bruno Díaz", "Ana Torres"]);

    let effective = matrix.cell(TalentBox::Effective).expect("effective cell");
    assert!(effective.employees.is_empty());

    assert_eq!(matrix.unplaced.len(), 1);
    assert_eq!(matrix.unplaced[0].employee_id.as_str(), "emp-4");
}

#[test]
fn matrix_filters_by_department() {
    let employees = vec![
        employee("emp-1", "Ana Torres", "Engineering"),
        employee("emp-3", "Carla Ruiz", "Sales"),
    ];
    let evaluations = vec![
        evaluation_record(
            "eval-000001",
            "emp-1",
            date(2025, 6, 30),
            9.0,
            PerformanceLevel::High,
            PotentialRating::High,
        ),
        evaluation_record(
            "eval-000002",
            "emp-3",
            date(2025, 6, 30),
            3.0,
            PerformanceLevel::Low,
            PotentialRating::Medium,
        ),
    ];

    let matrix = build_talent_matrix(&employees, &evaluations, Some("sales"));
    assert_eq!(matrix.placed(), 1);
    let cell = matrix
        .cell(TalentBox::InconsistentPlayer)
        .expect("inconsistent player cell");
    assert_eq!(cell.employees[0].department, "Sales");
}

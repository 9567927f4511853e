//! Unit tests for graph statistics

use weave_domain::GraphStatistics;

#[test]
fn test_health_score_perfect_graph() {
    assert_eq!(GraphStatistics::health_score_for(0, 1.5), 100);
}

#[test]
fn test_health_score_cycle_penalty() {
    assert_eq!(GraphStatistics::health_score_for(1, 0.0), 75);
    assert_eq!(GraphStatistics::health_score_for(2, 0.0), 50);
}

#[test]
fn test_health_score_fan_out_penalty() {
    // 2 units over the budget at 5 points each
    assert_eq!(GraphStatistics::health_score_for(0, 5.0), 90);
}

#[test]
fn test_health_score_is_clamped() {
    assert_eq!(GraphStatistics::health_score_for(10, 50.0), 0);
}

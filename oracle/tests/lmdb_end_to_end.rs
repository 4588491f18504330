//! End-to-end: the consensus engine running over the LMDB backend.

use pulsar_nullables::{NullPolicy, NullRegistry};
use pulsar_oracle::{OracleError, PerformanceOracle};
use pulsar_store_lmdb::LmdbOracleStore;
use pulsar_types::{AttesterId, CampaignId, Measurement, OracleParams, Timestamp};

fn measurement(impressions: u64, clicks: u64, fraud: u32, quality: u32) -> Measurement {
    Measurement {
        impressions_verified: impressions,
        clicks_verified: clicks,
        fraud_rate_bps: fraud,
        quality_score: quality,
    }
}

#[test]
fn consensus_over_lmdb_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let campaign = CampaignId::new(42);
    let params = OracleParams {
        min_attesters: 2,
        retention_secs: 3600,
    };
    let registry =
        NullRegistry::with_authorized(["acct_a", "acct_b", "acct_c"].map(AttesterId::new));

    {
        let store =
            LmdbOracleStore::open_with_map_size(dir.path(), &params, 10 * 1024 * 1024).unwrap();
        let oracle = PerformanceOracle::new(store, registry, NullPolicy::new(2));

        oracle
            .submit(
                campaign,
                AttesterId::new("acct_a"),
                measurement(1000, 100, 1000, 80),
                Timestamp::new(1),
            )
            .unwrap();
        assert!(matches!(
            oracle.consensus(campaign),
            Err(OracleError::NotReached(_))
        ));

        oracle
            .submit(
                campaign,
                AttesterId::new("acct_b"),
                measurement(2000, 200, 2000, 90),
                Timestamp::new(2),
            )
            .unwrap();
        let c = oracle.consensus(campaign).unwrap();
        assert_eq!(c.avg_impressions, 1500);
        assert_eq!(c.avg_quality_score, 85);
    }

    // Reopen the environment: the consensus and attestations persist, and
    // a late outlier is diluted rather than dominant.
    let store =
        LmdbOracleStore::open_with_map_size(dir.path(), &params, 10 * 1024 * 1024).unwrap();
    let registry =
        NullRegistry::with_authorized(["acct_a", "acct_b", "acct_c"].map(AttesterId::new));
    let oracle = PerformanceOracle::new(store, registry, NullPolicy::new(2));

    let c = oracle.consensus(campaign).unwrap();
    assert_eq!(c.total_attesters, 2);

    oracle
        .submit(
            campaign,
            AttesterId::new("acct_c"),
            measurement(9000, 900, 9000, 10),
            Timestamp::new(3),
        )
        .unwrap();
    let c = oracle.consensus(campaign).unwrap();
    assert_eq!(c.avg_impressions, 4000);
    assert_eq!(c.avg_clicks, 400);
    assert_eq!(c.avg_fraud_rate_bps, 4000);
    assert_eq!(c.avg_quality_score, 60);
    assert_eq!(c.total_attesters, 3);
}

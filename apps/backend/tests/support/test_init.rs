/// Switch this test binary to `RollbackOnOk` before any test runs.
///
/// Binaries that do not include this file keep the default commit policy.
#[ctor::ctor]
fn init_test_txn_policy() {
    pickem::db::txn_policy::set_txn_policy(pickem::db::txn_policy::TxnPolicy::RollbackOnOk);
}

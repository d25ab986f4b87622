mod failure_tests;
mod roundtrip_tests;

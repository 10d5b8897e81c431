mod fallback_test;

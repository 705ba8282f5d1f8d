mod property_table_tests;

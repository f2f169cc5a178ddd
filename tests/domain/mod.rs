mod index_schema_test;

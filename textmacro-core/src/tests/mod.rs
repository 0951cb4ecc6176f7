mod lexer_tests;

filmstrip::__log_shims!($ "filmstrip_adapter" => atrace: trace, adebug: debug, awarn: warn);
